//! Template injection
//!
//! Merges provider-produced body markup with a fixed page template. Slot
//! markers are located in the template text only and the pieces are spliced
//! together in one pass, so marker-shaped text inside user content is never
//! re-scanned and cannot corrupt the output.

mod embedded;

pub use embedded::template_source;

/// Marker replaced by the worksheet body markup.
pub const BODY_SLOT: &str = "VAR_CONTENT";
/// Marker replaced by the worksheet topic.
pub const TOPIC_SLOT: &str = "VAR_TOPIC";
/// Marker replaced by the formatted author line (or removed entirely).
pub const TEACHER_SLOT: &str = "VAR_TEACHER";

/// Page layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    OneColumn,
    TwoColumn,
}

impl Layout {
    /// Parse a client-supplied layout tag; unrecognized values fall back to
    /// the single-column default.
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.trim() {
            "2col" => Layout::TwoColumn,
            _ => Layout::OneColumn,
        }
    }
}

/// Render full document source from body markup, topic and author label.
///
/// A blank `teacher_name` removes the author line from the output entirely;
/// a non-blank one is set flush right under the title.
pub fn render(body: &str, topic: &str, teacher_name: &str, layout: Layout) -> String {
    let teacher_line = if teacher_name.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\\begin{{flushright}}\\textit{{Учитель: {}}}\\end{{flushright}}",
            teacher_name.trim()
        )
    };

    splice(
        template_source(layout),
        &[
            (TOPIC_SLOT, topic),
            (TEACHER_SLOT, &teacher_line),
            (BODY_SLOT, body),
        ],
    )
}

/// Replace each slot marker with its value in a single pass over the
/// template. Marker offsets come from the template alone; inserted values
/// are copied verbatim and never searched for further markers.
fn splice(template: &str, slots: &[(&str, &str)]) -> String {
    let mut positions: Vec<(usize, &str, &str)> = slots
        .iter()
        .filter_map(|&(marker, value)| template.find(marker).map(|pos| (pos, marker, value)))
        .collect();
    positions.sort_by_key(|&(pos, _, _)| pos);

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for (pos, marker, value) in positions {
        out.push_str(&template[cursor..pos]);
        out.push_str(value);
        cursor = pos + marker.len();
    }
    out.push_str(&template[cursor..]);
    out
}

/// Extract the answers page from a worksheet body, if it has one.
///
/// The provider is instructed to end the body with `\newpage` followed by an
/// answers section; when that trailing page is present it becomes the source
/// for the separate answer-key document.
pub fn answer_key_body(body: &str) -> Option<String> {
    let (_, tail) = body.rsplit_once("\\newpage")?;
    let tail = tail.trim();
    if tail.starts_with("\\section*{Отв") {
        Some(tail.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BODY: &str = "\\TaskBox{1}{Решите $x^2=4$.}\n\\WriteField{48mm}";

    #[test]
    fn substitutes_body_and_topic_verbatim() {
        let out = render(BODY, "Квадратные уравнения", "", Layout::OneColumn);
        assert!(out.contains(BODY));
        assert!(out.contains("Квадратные уравнения"));
        assert!(!out.contains(BODY_SLOT));
        assert!(!out.contains(TOPIC_SLOT));
        assert!(!out.contains(TEACHER_SLOT));
    }

    #[test]
    fn blank_teacher_removes_author_line() {
        let out = render(BODY, "Тема", "   ", Layout::OneColumn);
        assert!(!out.contains("Учитель"));
        assert!(!out.contains(TEACHER_SLOT));
    }

    #[test]
    fn teacher_name_is_formatted() {
        let out = render(BODY, "Тема", "Иванова А. П.", Layout::OneColumn);
        assert!(out.contains("Учитель: Иванова А. П."));
    }

    #[test]
    fn marker_text_inside_body_is_not_substituted() {
        // A body that happens to contain a slot marker must pass through
        // untouched; only the template's own markers are slots.
        let tricky = "\\TaskBox{1}{VAR_TOPIC is literal}";
        let out = render(tricky, "Тема", "", Layout::OneColumn);
        assert!(out.contains("VAR_TOPIC is literal"));
        assert_eq!(out.matches("VAR_TOPIC").count(), 1);
    }

    #[test]
    fn layout_parses_leniently() {
        assert_eq!(Layout::parse_lenient("1col"), Layout::OneColumn);
        assert_eq!(Layout::parse_lenient("2col"), Layout::TwoColumn);
        assert_eq!(Layout::parse_lenient("three"), Layout::OneColumn);
        assert_eq!(Layout::parse_lenient(""), Layout::OneColumn);
    }

    #[test]
    fn answer_key_found_on_final_page() {
        let body = "\\TaskBox{1}{a}\n\\WriteField{48mm}\n\\newpage\n\\section*{Ответы}\n\\begin{tabular}{|c|c|}\\hline 1 & $2$ \\\\ \\hline\\end{tabular}";
        let key = answer_key_body(body).expect("answers page present");
        assert!(key.starts_with("\\section*{Ответы}"));
        assert!(key.contains("tabular"));
    }

    #[test]
    fn no_answer_key_without_answers_section() {
        assert!(answer_key_body("\\TaskBox{1}{a}").is_none());
        // A page break followed by more tasks is not an answers page.
        assert!(answer_key_body("\\TaskBox{1}{a}\n\\newpage\n\\TaskBox{2}{b}").is_none());
    }

    #[test]
    fn variant2_answers_heading_is_recognized() {
        let body = "\\TaskBox{1}{a}\n\\newpage\n\\section*{Ответы (Вариант 2)}\nтаблица";
        assert!(answer_key_body(body).is_some());
    }
}
