use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Install a custom settings file before anything reads `settings()`.
pub fn load_custom(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(pfx_core::settings::init_custom(content), "Error: {}");
}

pub fn settings_export() {
    print!("{}", pfx_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        pfx_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!("{}", format_settings_summary(&s));
}

pub fn format_settings_summary(s: &pfx_core::settings::Settings) -> String {
    let budget = match s.build.prefix_budget() {
        Some(n) => n.to_string(),
        None => "unlimited".to_string(),
    };
    format!(
        "OK: build.strategy={}, build.max_prefixes={}, build.parallel={}, query.default_limit={}",
        s.build.strategy.as_str(),
        budget,
        s.build.parallel,
        s.query.default_limit
    )
}
