// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
                     _
                    | |
  ____   ____ _____ | |  ____ ____
 / _  | / ___|____ |/ _  |/ _  ) ___)
( (_| || |   / ___ ( (_| ( (/ / |
 \___ ||_|   \_____|\____|\____)_|
(_____|

    Rubric-based PDF grading, powered by Gemini
"#;
    println!("{}", banner);
}
