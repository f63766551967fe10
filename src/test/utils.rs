use std::path::PathBuf;

pub fn get_test_input_file(filename: &str) -> PathBuf {
    let mut f = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    f.push(format!("src/test/inputs/{}", filename));
    f
}

pub fn get_test_output_file(filename: &str) -> PathBuf {
    let mut f = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    f.push(format!("target/test-outputs/{}.csv", filename));
    if let Some(parent) = f.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    f
}
