//! Build script for stipple-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates plotter.toml at compile time
//! - Validates the bundled images at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Images compiled into the catalog, in menu order
const IMAGES: &[&str] = &["images/heart.txt", "images/smile.txt", "images/dog.txt"];

/// Widest row the firmware accepts (matches `MAX_COLUMNS` in stipple-core)
const MAX_COLUMNS: usize = 126;

/// Known keys per section, with their accepted range
const KEYS: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "geometry",
        &[
            ("pixel_pitch_um", 1, 100_000),
            ("carriage_deg_per_mm_x1000", 1, 1_000_000),
            ("feed_deg_per_mm_x1000", 1, 1_000_000),
            ("max_columns", 1, MAX_COLUMNS as i64),
        ],
    ),
    (
        "marker",
        &[
            ("depth_deg", 1, 360),
            ("print_power", -100, 100),
            ("travel_power", -100, 100),
            ("row_return_power", -100, 100),
            ("setup_home_power", -100, 100),
            ("clearance_px", 0, 1000),
            ("row_feed_um", 0, 100_000),
            ("feed_power", -100, 100),
        ],
    ),
    (
        "homing",
        &[
            ("power", -100, 100),
            ("interval_ms", 1, 10_000),
            ("min_change_deg", 1, 360),
            ("descent_deg", 0, 3600),
            ("settle_ms", 0, 60_000),
        ],
    ),
    (
        "paper",
        &[
            ("threshold", 0, 100),
            ("load_power", -100, 100),
            ("backoff_deg", 0, 3600),
            ("settle_ms", 0, 60_000),
            ("eject_power", -100, 100),
            ("eject_run_on_ms", 0, 60_000),
        ],
    ),
    (
        "control",
        &[("pause_poll_ms", 1, 1000), ("abort_hold_ms", 0, 60_000)],
    ),
    (
        "timeouts",
        &[
            ("move_ms", 0, 600_000),
            ("switch_ms", 0, 600_000),
            ("homing_ms", 0, 600_000),
            ("paper_ms", 0, 600_000),
        ],
    ),
];

fn main() {
    setup_linker();
    validate_config();
    validate_images();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate plotter.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=plotter.toml");

    let config_path = Path::new("plotter.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: plotter.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a plotter.toml configuration file.        ║\n\
            ║  Please create one in the stipple-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read plotter.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in plotter.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = validate_sections(&config);
    errors.extend(validate_powers(&config));
    report("Invalid plotter configuration", &errors);

    println!("cargo:warning=plotter.toml validated successfully");
}

/// Check every section and key against the known table
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for (section, value) in root {
        let Some(keys) = KEYS.iter().find(|(name, _)| *name == section.as_str()).map(|(_, k)| *k) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            let Some(&(_, min, max)) = keys.iter().find(|(name, _, _)| *name == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            match value.as_integer() {
                Some(n) if (min..=max).contains(&n) => {}
                Some(_) => errors.push(format!("[{}] {} must be {}..={}", section, key, min, max)),
                None => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        }
    }

    errors
}

/// Powers that drive a motion loop must not be zero
fn validate_powers(config: &toml::Value) -> Vec<String> {
    const NON_ZERO: &[(&str, &str)] = &[
        ("marker", "print_power"),
        ("marker", "travel_power"),
        ("marker", "row_return_power"),
        ("marker", "setup_home_power"),
        ("marker", "feed_power"),
        ("homing", "power"),
        ("paper", "load_power"),
        ("paper", "eject_power"),
    ];

    NON_ZERO
        .iter()
        .filter(|(section, key)| {
            config
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                == Some(0)
        })
        .map(|(section, key)| format!("[{}] {} must not be 0", section, key))
        .collect()
}

/// Validate the bundled images at compile time
fn validate_images() {
    let mut errors = Vec::new();

    for path in IMAGES {
        println!("cargo:rerun-if-changed={}", path);

        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                errors.push(format!("{}: {}", path, e));
                continue;
            }
        };
        if let Err(e) = check_image(&data) {
            errors.push(format!("{}: {}", path, e));
        }
    }

    report("Invalid bundled image", &errors);
}

/// Check the `columns rows` header and that exactly rows × columns 0/1 follow
fn check_image(data: &str) -> Result<(), String> {
    let mut tokens = data.split_ascii_whitespace();
    let mut dimension = |name: &str| -> Result<usize, String> {
        tokens
            .next()
            .ok_or(format!("missing {}", name))?
            .parse()
            .map_err(|_| format!("invalid {}", name))
    };
    let columns = dimension("column count")?;
    let rows = dimension("row count")?;

    if columns == 0 || columns > MAX_COLUMNS {
        return Err(format!("column count must be 1..={}", MAX_COLUMNS));
    }

    let pixels: Vec<&str> = tokens.collect();
    if pixels.len() != columns * rows {
        return Err(format!(
            "expected {} pixels, found {}",
            columns * rows,
            pixels.len()
        ));
    }
    if let Some(i) = pixels.iter().position(|p| *p != "0" && *p != "1") {
        return Err(format!("row {} column {} is not 0 or 1", i / columns, i % columns));
    }
    Ok(())
}

/// Panic with a boxed list of errors, if any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
