use crate::core::theme::{builtin_themes, Theme};

pub fn list_themes(current: &Theme) {
    println!("Available themes:\n");
    for line in theme_lines(current) {
        println!("{line}");
    }
    println!("\nCurrent: {}", current.name.to_lowercase());
    println!("Change it inside the shell with 'theme set <name>'.");
}

fn theme_lines(current: &Theme) -> Vec<String> {
    builtin_themes()
        .iter()
        .map(|theme| {
            let mark = if theme.name.eq_ignore_ascii_case(&current.name) {
                "*"
            } else {
                " "
            };
            format!(
                "  {} {:<14} bg {} fg {} cursor {}",
                mark,
                theme.name.to_lowercase(),
                theme.background,
                theme.foreground,
                theme.cursor_color
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::find_builtin_theme;

    #[test]
    fn marks_only_the_current_theme() {
        let current = find_builtin_theme("dracula").unwrap();
        let lines = theme_lines(&current);
        assert_eq!(lines.len(), builtin_themes().len());
        let marked: Vec<&String> = lines.iter().filter(|l| l.starts_with("  *")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("dracula"));
    }
}
