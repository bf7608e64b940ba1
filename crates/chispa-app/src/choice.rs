use chispa_core::Choice;

/// One line of user input, read against the meanings on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Choice(Choice),
    /// `r`: a hint has to be read next
    AskHint,
    /// Not understood; the message says what is accepted
    Invalid(String),
}

pub fn parse_choice(input: &str, count: usize, allow_skip: bool) -> Parsed {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "" if count == 1 => Parsed::Choice(Choice::Accept),
        "r" => Parsed::AskHint,
        "s" if allow_skip => Parsed::Choice(Choice::Skip),
        _ if count > 1 => match input.parse::<usize>() {
            Ok(index) if (1..=count).contains(&index) => Parsed::Choice(Choice::Pick(index)),
            _ => Parsed::Invalid(usage(count, allow_skip)),
        },
        _ => Parsed::Invalid(usage(count, allow_skip)),
    }
}

/// Prompt shown while meanings are listed
pub fn prompt(count: usize, allow_skip: bool) -> String {
    let skip = if allow_skip { ", 's' skip" } else { "" };
    if count == 1 {
        format!("Press Enter to use it{skip}, or 'r' to retry with hint: ")
    } else {
        format!("Select [1-{count}]{skip}, or 'r' to retry with hint: ")
    }
}

fn usage(count: usize, allow_skip: bool) -> String {
    let skip = if allow_skip { ", 's'" } else { "" };
    if count == 1 {
        format!("Press Enter{skip} or 'r'")
    } else {
        format!("Enter 1-{count}{skip} or 'r'")
    }
}
