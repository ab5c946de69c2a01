use std::io::Write;
use std::path::Path;

use rocket::local::blocking::Client;

use crate::config::ServerConfig;

pub fn snapshot_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

pub fn client_with_dist(data_file: &Path, dist_dir: &Path) -> Client {
    let config = ServerConfig {
        data_file: data_file.to_path_buf(),
        dist_dir: dist_dir.to_path_buf(),
        ..ServerConfig::default()
    };
    Client::tracked(crate::build(config)).expect("valid rocket instance")
}

pub fn client(data_file: &Path) -> Client {
    client_with_dist(data_file, &data_file.with_extension("dist"))
}
