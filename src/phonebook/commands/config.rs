use crate::commands::{CmdMessage, CmdResult};
use crate::config::PhonebookConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = PhonebookConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = PhonebookConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(config.get(&key)?));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = PhonebookConfig::load(config_dir)?;
            config.set(&key, &value)?;
            config.save(config_dir)?;
            let shown = config.get(&key)?;
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::GeneratorLayout;
    use crate::error::PhonebookError;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("generator-layout".into(), "without-id".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "generator-layout set to without_id");

        let shown = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(
            shown.config.unwrap().generator_layout,
            GeneratorLayout::WithoutId
        );
    }

    #[test]
    fn bad_values_fail_and_are_not_saved() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("first-id".into(), "many".into()),
        );
        assert!(matches!(result, Err(PhonebookError::Api(_))));
        assert!(!dir.path().join("config.json").exists());

        let unknown = run(dir.path(), ConfigAction::ShowKey("colour".into()));
        assert!(unknown.is_err());
    }
}
