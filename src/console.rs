/// An ANSI color code for color terminals.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

/// Pads text to a specific length. Positive padding values pad at the end, negative at the
/// beginning.
fn pad(text: &str, pad_to: isize) -> String {
    let width = pad_to.unsigned_abs();
    if pad_to > 0 {
        format!("{:<width$}", text, width = width)
    } else if pad_to < 0 {
        format!("{:>width$}", text, width = width)
    } else {
        String::from(text)
    }
}

/// Outputs text, optionally in a given color, padded to a specific length. Positive padding values
/// pad at the end, negative at the beginning.
///
/// Colors are only used if the `console` feature is enabled and the terminal allows them (see
/// `NO_COLOR` and `CLICOLOR`).
pub fn write_in_color<S: AsRef<str>>(text: S, color: Option<Color>, pad_to: isize) {
    let padded = pad(text.as_ref(), pad_to);

    #[cfg(feature = "console")]
    {
        if console::colors_enabled() {
            if let Some(clr) = color {
                let styled = console::style(padded);
                let colored = match clr {
                    Color::DarkGray => styled.bright().black(),
                    Color::Blue => styled.bright().blue(),
                    Color::Green => styled.bright().green(),
                    Color::Cyan => styled.bright().cyan(),
                    Color::Red => styled.bright().red(),
                    Color::Magenta => styled.bright().magenta(),
                    Color::Yellow => styled.bright().yellow(),
                    Color::White => styled.bright().white(),
                };
                print!("{}", colored);
                return;
            }
        }
    }
    #[cfg(not(feature = "console"))]
    let _ = color;

    print!("{}", padded);
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pad() {
        assert_eq!("abc   ", pad("abc", 6));
        assert_eq!("   abc", pad("abc", -6));
        assert_eq!("abc", pad("abc", 0));
        assert_eq!("abcdef", pad("abcdef", 3));
        assert_eq!("abcdef", pad("abcdef", -3));
    }
}
