use super::*;
use tempfile::TempDir;

#[test]
fn default_config() {
    let config = Config::default();
    assert_eq!(config.loader.preview_chars, 50);
    assert_eq!(config.database.path, None);
}

#[test]
fn config_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    let mut invalid_config = config.clone();
    invalid_config.loader.preview_chars = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.loader.preview_chars = 201;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config;
    invalid_config.database.path = Some(PathBuf::new());
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::InvalidDatabasePath(_))
    ));
}

#[test]
fn database_path_resolution() {
    let mut config = Config {
        base_dir: PathBuf::from("/home/user/.faq-loader"),
        ..Config::default()
    };
    assert_eq!(
        config.database_path(),
        PathBuf::from("/home/user/.faq-loader/kb.db")
    );

    config.database.path = Some(PathBuf::from("data/faqs.db"));
    assert_eq!(
        config.database_path(),
        PathBuf::from("/home/user/.faq-loader/data/faqs.db")
    );

    config.database.path = Some(PathBuf::from("/srv/kb/kb.db"));
    assert_eq!(config.database_path(), PathBuf::from("/srv/kb/kb.db"));
}

#[test]
fn toml_serialization() {
    let config = Config {
        database: DatabaseConfig {
            path: Some(PathBuf::from("/tmp/kb.db")),
        },
        loader: LoaderConfig { preview_chars: 40 },
        base_dir: PathBuf::new(),
    };
    let toml_str = toml::to_string(&config).expect("should serialize toml correctly");
    let parsed_config: Config = toml::from_str(&toml_str).expect("should parse toml correctly");
    assert_eq!(config, parsed_config);
}

#[test]
fn partial_toml_uses_defaults() {
    let parsed: Config = toml::from_str("[database]\npath = \"other.db\"\n")
        .expect("should parse partial toml");
    assert_eq!(parsed.database.path, Some(PathBuf::from("other.db")));
    assert_eq!(parsed.loader, LoaderConfig::default());
}

#[test]
fn setter_validation() {
    let mut loader = LoaderConfig::default();

    assert!(loader.set_preview_chars(80).is_ok());
    assert_eq!(loader.preview_chars, 80);

    assert!(loader.set_preview_chars(9).is_err());
    assert!(loader.set_preview_chars(500).is_err());
    assert_eq!(loader.preview_chars, 80);
}

#[test]
fn load_missing_config() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let config = Config::load(temp_dir.path()).expect("should load config successfully");
    assert_eq!(config.loader, LoaderConfig::default());
    assert_eq!(config.get_base_dir(), temp_dir.path());
}

#[test]
fn save_and_reload() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let config_dir = temp_dir.path().join(".faq-loader");

    let config = Config {
        loader: LoaderConfig { preview_chars: 72 },
        base_dir: config_dir.clone(),
        ..Config::default()
    };
    config.save().expect("should save config successfully");
    assert!(config.config_file_path().exists());

    let reloaded = Config::load(&config_dir).expect("should reload config successfully");
    assert_eq!(reloaded, config);
}

#[test]
fn load_rejects_invalid_file() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[loader]\npreview_chars = 3\n",
    )
    .expect("should write config file");

    assert!(Config::load(temp_dir.path()).is_err());
}
