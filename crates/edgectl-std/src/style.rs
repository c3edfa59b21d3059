use console::style;

pub enum Style {
    Link,    // URLs, domains and service IDs
    Command, // Commands, flags, env variable keys, and profile names
    Failure,
    Path, // File paths
    HintPrefix,    // "HINT:" text
    InfoPrefix,    // "==>": text
    WarningPrefix, // "WARN:" text
    ErrorPrefix,   // "ERROR:", "error:", and "error[code]:" text
    Heading,
    Prompt, // "Value: [default]" text shown before reading input
    Version,
    Success,
}

impl Style {
    pub fn paint<S: AsRef<str>>(&self, message: S) -> String {
        let message_ref = message.as_ref();

        if is_no_color_set() {
            return message_ref.to_string();
        }

        match &self {
            Style::Link => style(message_ref).cyan().underlined(),
            Style::Version => style(message_ref).cyan(),
            Style::Command => style(message_ref).yellow(),
            Style::Prompt => style(message_ref).yellow().bold(),
            Style::Failure => style(message_ref).red(),
            Style::HintPrefix => style(message_ref).cyan().bold(),
            Style::InfoPrefix => style(message_ref).blue().bold(),
            Style::WarningPrefix => style(message_ref).yellow(),
            Style::ErrorPrefix => style(message_ref).red().bold(),
            Style::Path | Style::Heading => style(message_ref).bold(),
            Style::Success => style(message_ref).green(),
        }
        .to_string()
    }
}

pub fn is_no_color_set() -> bool {
    is_bool_env_var_set("NO_COLOR") || is_bool_env_var_set("EDGECTL_NO_COLOR")
}

fn is_bool_env_var_set(key: &str) -> bool {
    !matches!(
        std::env::var(key).as_deref(),
        Err(..) | Ok("") | Ok("0") | Ok("false") | Ok("False") | Ok("FALSE")
    )
}
