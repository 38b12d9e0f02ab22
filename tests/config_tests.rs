use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use spotify_catalog::config::Config;
use spotify_catalog::SpotifyClient;

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
client_id = "abc"
client_secret = "def"
market = "US"
cache_enabled = true
cache_ttl_secs = 120
api_base = "http://localhost:9000/v1"
log_dir = "/tmp"
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.client_id, "abc");
    assert_eq!(cfg.client_secret, "def");
    assert_eq!(cfg.market, "US");
    assert!(cfg.cache_enabled);
    assert_eq!(cfg.cache_ttl().as_secs(), 120);
    assert_eq!(cfg.api_base, "http://localhost:9000/v1");
    assert_eq!(cfg.log_dir.as_ref().unwrap().to_str().unwrap(), "/tmp");
    assert!(cfg.validate().is_ok());

    let client = SpotifyClient::from_config(&cfg);
    assert!(client.cache_enabled());
}

#[test]
fn config_from_path_rejects_bad_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    std::fs::write(&cfg_path, "cache_enabled = \"maybe\"").unwrap();
    assert!(Config::from_path(&cfg_path).is_err());
}
