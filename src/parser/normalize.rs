/// Clean raw extracted text before segmentation.
///
/// Line endings and form feeds become `\n`, tabs and non-breaking spaces become
/// plain spaces, space runs collapse inside each line, and consecutive blank
/// lines collapse to one.
pub fn normalize(raw: &str) -> String {
    let unified = raw
        .replace("\r\n", "\n")
        .replace(['\r', '\x0C'], "\n");

    let mut out = String::with_capacity(unified.len());
    let mut pending_blank = false;

    for line in unified.split('\n') {
        let line = collapse_spaces(line);
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(&line);
    }

    out
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_space = true;
    for c in line.chars() {
        let c = if c == '\t' || c == '\u{a0}' { ' ' } else { c };
        if c == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t\n "), "");
    }

    #[test]
    fn line_endings_and_form_feed() {
        assert_eq!(normalize("a\r\nb\rc\x0Cd"), "a\nb\nc\nd");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  10\u{a0}\u{a0}burpees\t\tcada  "), "10 burpees cada");
    }

    #[test]
    fn blank_runs_become_one() {
        assert_eq!(normalize("Mobility\n\n\n\n- geral\n\n"), "Mobility\n\n- geral");
    }

    #[test]
    fn keeps_repeated_lines() {
        assert_eq!(normalize("5 rounds\n5 rounds"), "5 rounds\n5 rounds");
    }
}
