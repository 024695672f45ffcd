use crate::core::config::data::Config;

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

impl Config {
    pub fn summary_lines(&self) -> Vec<String> {
        let mark = |set: bool| if set { "" } else { " (default)" };
        vec![
            format!("  model: {}{}", self.model(), mark(self.model.is_some())),
            format!(
                "  timeout: {}s{}",
                self.timeout().as_secs(),
                mark(self.timeout_secs.is_some_and(|secs| secs > 0))
            ),
            format!("  history: {}{}", self.history(), mark(self.history.is_some())),
            format!(
                "  attach-credential: {}{}",
                on_off(self.attach_credential()),
                mark(self.attach_credential.is_some())
            ),
            format!(
                "  markdown: {}{}",
                on_off(self.markdown()),
                mark(self.markdown.is_some())
            ),
        ]
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.summary_lines() {
            println!("{line}");
        }
    }
}
