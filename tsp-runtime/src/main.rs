use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use log::{info, warn};
use std::{fs, path::PathBuf};
use tsp_algorithms::{milp::MicroLpEngine, optimize};
use tsp_problem::{coordinates, distance, tour, CostMatrix, RouteStop};
use tsp_structs::{config::OptimizerConfig, report::SolveReport};
use tsp_utils::{compress_obj, dejsonify, jsonify};

fn cli() -> Command {
    Command::new("tsp-runtime")
        .about("Computes or verifies tours over a set of points")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Computes a tour")
                .arg(
                    arg!(<FILENAME> "CSV file of x,y coordinates with a header row")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--max [MAX_DISTANCE] "Distance budget, the tour stays strictly below it")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    arg!(--start [START] "Node the heuristic starts from")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--open [OPEN] "Do not return to the start node")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--heuristic [HEURISTIC] "Use nearest neighbor even without a budget")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"time-limit" [SECONDS] "Time limit for the exact solver")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--settings [SETTINGS] "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress [COMPRESS] "If output file is set, the report will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("distances")
                .about("Prints the cost matrix")
                .arg(
                    arg!(<FILENAME> "CSV file of x,y coordinates with a header row")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a tour and prints its distance")
                .arg(
                    arg!(<FILENAME> "CSV file of x,y coordinates with a header row")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<TOUR> "Json array of node indices or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--open [OPEN] "The tour does not return to its first node")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
    let matches = cli().get_matches();

    match match matches.subcommand() {
        Some(("solve", sub_m)) => {
            let overrides = Overrides {
                max_distance: sub_m.get_one::<i64>("max").copied(),
                start: sub_m.get_one::<usize>("start").copied(),
                open: *sub_m.get_one::<bool>("open").unwrap(),
                heuristic: *sub_m.get_one::<bool>("heuristic").unwrap(),
                time_limit_secs: sub_m.get_one::<u64>("time-limit").copied(),
                seed: sub_m.get_one::<String>("seed").cloned(),
            };
            solve(
                sub_m.get_one::<PathBuf>("FILENAME").unwrap().clone(),
                sub_m.get_one::<String>("settings").cloned(),
                overrides,
                sub_m.get_one::<PathBuf>("output").cloned(),
                *sub_m.get_one::<bool>("compress").unwrap(),
            )
        }
        Some(("distances", sub_m)) => {
            print_distances(sub_m.get_one::<PathBuf>("FILENAME").unwrap().clone())
        }
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<PathBuf>("FILENAME").unwrap().clone(),
            sub_m.get_one::<String>("TOUR").unwrap().clone(),
            *sub_m.get_one::<bool>("open").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        Ok(line) => println!("{}", line),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Command line flags, applied on top of the settings.
#[derive(Default)]
struct Overrides {
    max_distance: Option<i64>,
    start: Option<usize>,
    open: bool,
    heuristic: bool,
    time_limit_secs: Option<u64>,
    seed: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut OptimizerConfig) {
        if self.max_distance.is_some() {
            config.max_distance = self.max_distance;
        }
        if self.start.is_some() {
            config.start = self.start;
        }
        if self.open {
            config.closed = false;
        }
        if self.heuristic {
            config.force_heuristic = true;
        }
        if let Some(time_limit_secs) = self.time_limit_secs {
            config.time_limit_secs = time_limit_secs;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn solve(
    input_file: PathBuf,
    settings: Option<String>,
    overrides: Overrides,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<String> {
    let mut config = match settings {
        Some(settings) => load_settings(&settings)?,
        None => OptimizerConfig::default(),
    };
    overrides.apply(&mut config);

    let cost = load_cost_matrix(&input_file)?;
    let outcome = optimize(&cost, &config, &MicroLpEngine)?;
    let report = SolveReport::new(
        &outcome.strategy.to_string(),
        &outcome.result,
        config.max_distance.is_some(),
    )?;

    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(&report)?)?;
        } else {
            fs::write(&path, jsonify(&report))?;
        }
        info!("report written to {}", path.display());
    }
    // a single node is solved by its empty tour
    if report.is_no_solution() && cost.num_nodes() > 1 {
        warn!("no tour found for {}", input_file.display());
        return Ok(format!("No tour found for {}", input_file.display()));
    }
    Ok(report.summary())
}

fn print_distances(input_file: PathBuf) -> Result<String> {
    let cost = load_cost_matrix(&input_file)?;
    Ok(jsonify(&cost.to_rows()))
}

fn verify(input_file: PathBuf, tour_arg: String, open: bool) -> Result<String> {
    let cost = load_cost_matrix(&input_file)?;
    let order = load_tour(&tour_arg)?;
    let stops: Vec<RouteStop> = if open {
        order
            .windows(2)
            .map(|pair| RouteStop::new(pair[0], pair[1]))
            .collect()
    } else {
        tour::closed_stops(&order)
    };
    let distance = tour::total_distance(&cost, &stops)?;
    Ok(format!(
        "Tour of distance {} visits {} of {} nodes",
        distance,
        order.len(),
        cost.num_nodes()
    ))
}

fn load_cost_matrix(path: &PathBuf) -> Result<CostMatrix> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read coordinates file {}: {}", path.display(), e))?;
    let points = coordinates::parse_csv(&text)?;
    Ok(distance::build(&points)?)
}

fn load_settings(settings: &str) -> Result<OptimizerConfig> {
    let settings = if settings.ends_with(".json") {
        fs::read_to_string(settings)
            .map_err(|e| anyhow!("Failed to read settings file {}: {}", settings, e))?
    } else {
        settings.to_string()
    };
    dejsonify::<OptimizerConfig>(&settings).map_err(|e| anyhow!("Failed to parse settings: {}", e))
}

fn load_tour(tour: &str) -> Result<Vec<usize>> {
    let tour = if tour.ends_with(".json") {
        fs::read_to_string(tour).map_err(|e| anyhow!("Failed to read tour file {}: {}", tour, e))?
    } else {
        tour.to_string()
    };
    dejsonify::<Vec<usize>>(&tour).map_err(|e| anyhow!("Failed to parse tour: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};
    use tsp_utils::decompress_obj;

    const COORDINATES: &str = "x,y\n8,41\n220,125\n56,89\n196,145\n196,49\n64,21\n124,117\n\
        212,65\n24,17\n24,25\n172,117\n260,109\n252,21\n172,145\n40,137\n";
    const SQUARE: &str = "x,y\n0,0\n0,3\n4,3\n4,0\n";

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn budget(max_distance: i64) -> Overrides {
        Overrides {
            max_distance: Some(max_distance),
            seed: Some("cli".to_string()),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_overrides_take_precedence_over_settings() {
        let mut config = load_settings(
            r#"{"max_distance":50,"start":2,"time_limit_secs":5,"seed":"settings"}"#,
        )
        .unwrap();
        Overrides {
            max_distance: Some(100),
            open: true,
            seed: Some("cli".to_string()),
            ..Overrides::default()
        }
        .apply(&mut config);
        assert_eq!(config.max_distance, Some(100));
        assert_eq!(config.start, Some(2));
        assert_eq!(config.time_limit_secs, 5);
        assert!(!config.closed);
        assert!(!config.force_heuristic);
        assert_eq!(config.seed.as_deref(), Some("cli"));
    }

    #[test]
    fn test_unset_overrides_keep_settings() {
        let mut config = load_settings(r#"{"max_distance":50,"closed":false}"#).unwrap();
        let expected = config.clone();
        Overrides::default().apply(&mut config);
        assert_eq!(config, expected);
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempdir().unwrap();
        let json = r#"{"start":1,"force_heuristic":true}"#;
        let path = write_file(&dir, "settings.json", json);
        let config = load_settings(path.to_str().unwrap()).unwrap();
        assert_eq!(config, load_settings(json).unwrap());
        assert_eq!(config.start, Some(1));
        assert!(config.force_heuristic);
        assert_eq!(config.time_limit_secs, 30);

        let missing = dir.path().join("missing.json");
        let err = load_settings(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read settings file"));
        assert!(load_settings("{not json").is_err());
    }

    #[test]
    fn test_verify_closed_and_open() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "square.csv", SQUARE);
        assert_eq!(
            verify(input.clone(), "[0,1,2,3]".to_string(), false).unwrap(),
            "Tour of distance 14 visits 4 of 4 nodes"
        );
        assert_eq!(
            verify(input.clone(), "[0,1,2,3]".to_string(), true).unwrap(),
            "Tour of distance 10 visits 4 of 4 nodes"
        );
        let tour_file = write_file(&dir, "tour.json", "[3,2]");
        assert_eq!(
            verify(input.clone(), tour_file.to_str().unwrap().to_string(), true).unwrap(),
            "Tour of distance 3 visits 2 of 4 nodes"
        );
        assert!(verify(input, "[0,7]".to_string(), false).is_err());
    }

    #[test]
    fn test_solve_within_budget() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "points.csv", COORDINATES);
        let line = solve(input, None, budget(100), None, false).unwrap();
        assert_eq!(line, "Solution with distance of 58 found: 3 nodes touched");
    }

    #[test]
    fn test_solve_writes_report() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "square.csv", SQUARE);
        let json_path = dir.path().join("report.json");
        let line = solve(
            input.clone(),
            None,
            Overrides::default(),
            Some(json_path.clone()),
            false,
        )
        .unwrap();
        assert!(
            line.starts_with("Solution with distance of 14 found: [0, "),
            "{}",
            line
        );

        let report: SolveReport = dejsonify(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(report.strategy, "exact");
        assert_eq!(report.distance, 14);
        assert_eq!(report.nodes_touched, 4);
        assert!(!report.budgeted);
        assert_eq!(report.summary(), line);

        let zlib_path = dir.path().join("report.zlib");
        solve(input, None, Overrides::default(), Some(zlib_path.clone()), true).unwrap();
        let compressed: SolveReport = decompress_obj(&fs::read(&zlib_path).unwrap()).unwrap();
        assert_eq!(compressed.distance, 14);
        assert_eq!(compressed.nodes_touched, 4);
    }

    #[test]
    fn test_solve_reports_missing_tour() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "points.csv", COORDINATES);
        let line = solve(input.clone(), None, budget(1), None, false).unwrap();
        assert_eq!(line, format!("No tour found for {}", input.display()));
    }

    #[test]
    fn test_solve_single_node() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "one.csv", "x,y\n5,5\n");
        let line = solve(input, None, Overrides::default(), None, false).unwrap();
        assert_eq!(line, "Solution with distance of 0 found: []");
    }

    #[test]
    fn test_solve_rejects_bad_input() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = solve(missing, None, Overrides::default(), None, false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read coordinates file"));

        let input = write_file(&dir, "bad.csv", "x,y\n1,2,3\n");
        assert!(solve(input, None, Overrides::default(), None, false).is_err());
    }
}
