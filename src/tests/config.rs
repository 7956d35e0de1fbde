use super::Config;
use crate::document::Layout;

#[test]
fn test_defaults_from_empty_file() {
    let cfg = Config::from_toml("").unwrap();
    assert_eq!(cfg.sheet_name, "Нормативные сроки");
    assert_eq!(cfg.header_rows, 8);
    assert_eq!(cfg.notes_marker, "Примечание");
    assert_eq!(cfg.input, "os.xlsx");
    assert_eq!(cfg.output, "result.json");
    assert_eq!(cfg.log_level, "warn");
}

#[test]
fn test_partial_override() {
    let cfg = Config::from_toml("header_rows = 3\nsheet_name = \"Лист1\"\n").unwrap();
    assert_eq!(cfg.header_rows, 3);
    assert_eq!(cfg.sheet_name, "Лист1");
    assert_eq!(cfg.notes_marker, "Примечание");
}

#[test]
fn test_layout_from_config_matches_default() {
    let cfg = Config::from_toml("").unwrap();
    assert_eq!(Layout::from(&cfg), Layout::default());
}
