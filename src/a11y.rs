//! Keyboard and screen-reader affordances.

pub const SKIP_LINK_HREF: &str = "#main";
pub const SKIP_LINK_TEXT: &str = "Skip to main content";
pub const SKIP_LINK_CLASS: &str = "skip-link";
pub const INTERACTIVE_SELECTOR: &str = "button, a, input, textarea, select";
pub const FOCUSABLE_SELECTOR: &str = "button:not([disabled]), [href], input:not([disabled]), \
     select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"])";
pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Where Tab should wrap to, if anywhere. `None` leaves the browser default.
pub fn focus_wrap_target(len: usize, focused: Option<usize>, shift: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match (focused, shift) {
        (Some(0), true) => Some(last),
        (Some(index), false) if index == last => Some(0),
        _ => None,
    }
}

/// 1-based sequential tab order.
pub fn tab_index(position: usize) -> String {
    (position + 1).to_string()
}

pub fn synthetic_heading_id(section_index: usize) -> String {
    format!("section-{section_index}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionLabel {
    /// Value for the section's `aria-labelledby`.
    pub labelled_by: String,
    /// Set when the heading needs this id assigned.
    pub assign_heading_id: Option<String>,
}

/// Decides how to label a section from its first heading.
pub fn section_label(
    section_index: usize,
    has_aria_label: bool,
    heading_id: Option<Option<&str>>,
) -> Option<SectionLabel> {
    if has_aria_label {
        return None;
    }
    let heading_id = heading_id?;

    match heading_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Some(SectionLabel {
            labelled_by: id.to_string(),
            assign_heading_id: None,
        }),
        None => {
            let id = synthetic_heading_id(section_index);
            Some(SectionLabel {
                labelled_by: id.clone(),
                assign_heading_id: Some(id),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_on_last_wraps_to_first() {
        assert_eq!(focus_wrap_target(4, Some(3), false), Some(0));
        assert_eq!(focus_wrap_target(4, Some(2), false), None);
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        assert_eq!(focus_wrap_target(4, Some(0), true), Some(3));
        assert_eq!(focus_wrap_target(4, Some(1), true), None);
    }

    #[test]
    fn focus_outside_the_set_is_left_alone() {
        assert_eq!(focus_wrap_target(4, None, false), None);
        assert_eq!(focus_wrap_target(0, Some(0), false), None);
    }

    #[test]
    fn single_focusable_wraps_onto_itself() {
        assert_eq!(focus_wrap_target(1, Some(0), false), Some(0));
        assert_eq!(focus_wrap_target(1, Some(0), true), Some(0));
    }

    #[test]
    fn tab_indices_start_at_one() {
        assert_eq!(tab_index(0), "1");
        assert_eq!(tab_index(9), "10");
    }

    #[test]
    fn labelled_sections_are_skipped() {
        assert_eq!(section_label(0, true, Some(Some("about-title"))), None);
    }

    #[test]
    fn sections_without_heading_are_skipped() {
        assert_eq!(section_label(2, false, None), None);
    }

    #[test]
    fn existing_heading_id_is_reused() {
        assert_eq!(
            section_label(1, false, Some(Some("about-title"))),
            Some(SectionLabel {
                labelled_by: "about-title".into(),
                assign_heading_id: None,
            })
        );
    }

    #[test]
    fn missing_heading_id_gets_a_synthetic_one() {
        let expected = Some(SectionLabel {
            labelled_by: "section-3".into(),
            assign_heading_id: Some("section-3".into()),
        });
        assert_eq!(section_label(3, false, Some(None)), expected);
        assert_eq!(section_label(3, false, Some(Some("  "))), expected);
    }
}
