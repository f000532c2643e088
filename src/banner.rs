// src/banner.rs

/// Prints the run banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
            _      _               _
  ___ __ _ | | ___| |__   ___  ___| | __
 / __/ _` || |/ __| '_ \ / _ \/ __| |/ /
| (_| (_| || | (__| | | |  __/ (__|   <
 \___\__,_||_|\___|_| |_|\___|\___|_|\_\

    Calculation Service Conformance Suite
"#;
    println!("{}", banner);
}
