//! Deterministic fallback report
//!
//! Used when the AI collaborator is unavailable. The text follows the same
//! conventions as AI output (`**heading**` lines, bullet markers), so it goes
//! through the structuring engine unchanged.

use crate::details::EventDetails;

/// Build the nine-section fallback report from the event details alone
pub fn fallback_report(details: &EventDetails) -> String {
    let d = |key: &str, default: &'static str| details.get_or(key, default).to_string();

    format!(
        "**1. Event Title**
{title}

**2. College and Department Information**
{college}
{dept}

**3. Date and Venue**
**Date:** {date}
**Venue:** {venue}

**4. Organizer and Speaker(s)**
**Organizer:** {organizer}
**Speaker(s):** {speaker}

**5. Introduction**
This report provides an overview of the {event_type} conducted.

**6. Objectives**
\u{2022} {objectives}

**7. Key Highlights and Activities**
\u{2022} The event was successfully conducted with active participation.

**8. Learning Outcomes and Feedback**
\u{2022} {outcomes}

**9. Conclusion**
The event was successfully conducted and achieved its intended objectives.",
        title = d("event_title", "Event Title"),
        college = d("college_name", "College Name"),
        dept = d("dept_name", "Department Name"),
        date = d("date", "Date"),
        venue = d("venue", "Venue"),
        organizer = d("organizer", "Organizer"),
        speaker = d("speaker", "Speaker"),
        event_type = d("event_type", "event"),
        objectives = d("objectives", "Event objectives"),
        outcomes = d("outcomes", "Positive feedback received from participants"),
    )
}
