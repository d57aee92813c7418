#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Solving the current expression
    Quiz,
    /// Command deck open at the bottom of the screen
    Command,
    /// Instructions panel
    Help,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appmode_enum_exists() {
        let _mode = AppMode::Quiz;
        let _mode = AppMode::Command;
        let _mode = AppMode::Help;
        let _mode = AppMode::Quit;
    }
}
