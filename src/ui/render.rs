use crate::ui::PickItem;

/// One numbered line per visible item, detail indented underneath.
pub fn render_items(items: &[PickItem], visible: &[usize]) -> String {
    let width = visible.len().to_string().len();
    let mut out = String::new();

    for (n, &idx) in visible.iter().enumerate() {
        let item = &items[idx];
        out.push_str(&format!("{:>width$}. {}", n + 1, item.label, width = width));
        if let Some(description) = &item.description {
            out.push_str(&format!("  ({})", description));
        }
        out.push('\n');
        if let Some(detail) = &item.detail {
            out.push_str(&format!("{:width$}  {}\n", "", detail, width = width));
        }
    }
    out
}

pub fn render_choices(message: &str, choices: &[&str]) -> String {
    let mut out = format!("{}\n", message);
    for (n, choice) in choices.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", n + 1, choice));
    }
    out
}
