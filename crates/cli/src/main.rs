mod input;
mod provenance;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use realizer::api::{
    heuristic_embed, prove_existence, simplex_square_distance, CertificateTrace, EmbedCfg, Interval,
    LcpCfg, ProveCfg, Verdict,
};
use serde::Serialize;
use serde_json::json;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use input::{load, parse_points, DistanceInput, Problem};

#[derive(Parser)]
#[command(name = "realizer-cli")]
#[command(about = "Embed simplicial complexes and certify prescribed squared edge lengths")]
struct Cmd {
    /// trace, debug, info, warn or error
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Embed the problem's complex and try to prove existence
    Prove(ProveArgs),
    /// Exact squared distance between two simplices
    Distance {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args, Clone, Debug)]
struct ProveArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    tries: Option<usize>,
    #[arg(long)]
    round_digits: Option<u32>,
    #[arg(long)]
    sqrt_digits: Option<u32>,
    /// Include the certificate transcript
    #[arg(long)]
    verbose: bool,
    /// Also write the report here, with a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct TraceRow {
    check: u8,
    name: &'static str,
    inequality: &'static str,
    lhs: [String; 2],
    relation: &'static str,
    rhs: [String; 2],
    outcome: String,
    digits: u32,
}

#[derive(Serialize)]
struct ProveReport {
    proven: bool,
    reason: String,
    failed_check: Option<u8>,
    coordinates: BTreeMap<String, Vec<String>>,
    notes: BTreeMap<String, String>,
    trace: Option<Vec<TraceRow>>,
}

fn ends(i: &Interval) -> [String; 2] {
    [i.lo().to_string(), i.hi().to_string()]
}

fn trace_rows(trace: &CertificateTrace) -> Vec<TraceRow> {
    trace
        .entries
        .iter()
        .map(|e| TraceRow {
            check: e.check.number(),
            name: e.check.name(),
            inequality: e.check.inequality(),
            lhs: ends(&e.lhs),
            relation: e.relation,
            rhs: ends(&e.rhs),
            outcome: e.outcome.to_string(),
            digits: e.digits,
        })
        .collect()
}

fn report_from(verdict: &Verdict, coordinates: BTreeMap<String, Vec<String>>) -> ProveReport {
    ProveReport {
        proven: verdict.is_proven(),
        reason: verdict.reason(),
        failed_check: verdict.failed_check().map(|c| c.number()),
        coordinates,
        notes: verdict
            .trace
            .iter()
            .flat_map(|t| t.notes.iter().cloned())
            .collect(),
        trace: verdict.trace.as_ref().map(trace_rows),
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level: Level = cmd
        .log_level
        .parse()
        .with_context(|| format!("unknown log level {:?}", cmd.log_level))?;
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Prove(args) => {
            let report = prove(&args)?;
            let text = serde_json::to_string_pretty(&report)?;
            if let Some(out) = &args.out {
                write_report(out, &text, &args)?;
            }
            println!("{text}");
            Ok(())
        }
        Action::Distance { input } => {
            println!("{}", serde_json::to_string_pretty(&distance(&input)?)?);
            Ok(())
        }
        Action::Report => {
            let block = provenance::block(json!({}), &[]);
            println!("{}", serde_json::to_string_pretty(&block)?);
            Ok(())
        }
    }
}

fn prove(args: &ProveArgs) -> Result<ProveReport> {
    let problem: Problem = load(&args.input)?;
    let complex = problem.build_complex()?;
    let targets = problem.targets()?;
    let defaults = EmbedCfg::default();
    let embed_cfg = EmbedCfg {
        seed: args.seed.unwrap_or(defaults.seed),
        num_tries: args.tries.unwrap_or(defaults.num_tries),
        round_digits: args.round_digits.unwrap_or(defaults.round_digits),
        ..defaults
    };
    let prove_cfg = ProveCfg {
        verbose: args.verbose,
        sqrt_digits: args.sqrt_digits.unwrap_or(ProveCfg::default().sqrt_digits),
        ..ProveCfg::default()
    };
    tracing::info!(
        input = %args.input.display(),
        dim = problem.dim,
        vertices = complex.num_vertices(),
        edges = complex.num_edges(),
        "prove"
    );

    let Some(realized) = heuristic_embed(&complex, problem.dim, &targets, &embed_cfg) else {
        return Ok(ProveReport {
            proven: false,
            reason: format!("embedding failed after {} tries", embed_cfg.num_tries),
            failed_check: None,
            coordinates: BTreeMap::new(),
            notes: BTreeMap::new(),
            trace: None,
        });
    };
    let verdict = prove_existence(&realized, &targets, &prove_cfg);
    let coordinates = realized
        .vertex_coordinates()
        .iter()
        .map(|(v, xs)| (v.clone(), xs.iter().map(ToString::to_string).collect()))
        .collect();
    Ok(report_from(&verdict, coordinates))
}

fn write_report(out: &Path, text: &str, args: &ProveArgs) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;
    let params = json!({
        "input": args.input.to_string_lossy(),
        "seed": args.seed,
        "tries": args.tries,
        "round_digits": args.round_digits,
        "sqrt_digits": args.sqrt_digits,
    });
    provenance::write_sidecar(out, params)?;
    Ok(())
}

fn distance(path: &Path) -> Result<serde_json::Value> {
    let pair: DistanceInput = load(path)?;
    let s1 = parse_points(&pair.s1)?;
    let s2 = parse_points(&pair.s2)?;
    anyhow::ensure!(!s1.is_empty() && !s2.is_empty(), "both simplices need vertices");
    let dim = s1[0].len();
    anyhow::ensure!(
        s1.iter().chain(&s2).all(|p| p.len() == dim),
        "all points need {dim} coordinates"
    );
    let d = simplex_square_distance(&s1, &s2, &LcpCfg::default()).context("simplex distance")?;
    let strs = |xs: &[realizer::Rational]| xs.iter().map(ToString::to_string).collect::<Vec<_>>();
    Ok(json!({
        "sq_dist": d.sq_dist.to_string(),
        "closest": [strs(&d.closest.0), strs(&d.closest.1)],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(input: PathBuf) -> ProveArgs {
        ProveArgs {
            input,
            seed: None,
            tries: None,
            round_digits: Some(8),
            sqrt_digits: None,
            verbose: true,
            out: None,
        }
    }

    #[test]
    fn proves_the_right_triangle_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tri.json");
        fs::write(
            &path,
            r#"{"dim": 2,
                "complex": {"maximal_simplices": [["a","b"],["b","c"],["c","a"]]},
                "lengths": {"edges": [["a","b","9"],["b","c","16"],["c","a","25"]]}}"#,
        )
        .unwrap();
        let report = prove(&args(path)).unwrap();
        assert!(report.proven, "{}", report.reason);
        assert_eq!(report.coordinates.len(), 3);
        assert_eq!(report.trace.as_ref().map(Vec::len), Some(5));
        assert_eq!(report.notes.get("E").map(String::as_str), Some("3"));
    }

    #[test]
    fn report_file_gets_a_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs").join("r.json");
        write_report(&out, "{}", &args(PathBuf::from("p.json"))).unwrap();
        assert!(out.exists());
        assert!(dir.path().join("runs").join("r.provenance.json").exists());
    }

    #[test]
    fn distance_between_segments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pair.json");
        fs::write(&path, r#"{"s1": [["3","0"],["1","0"]], "s2": [["0","0"],["0","1"]]}"#).unwrap();
        let v = distance(&path).unwrap();
        assert_eq!(v["sq_dist"], "1");
        assert_eq!(v["closest"][0], json!(["1", "0"]));
        assert_eq!(v["closest"][1], json!(["0", "0"]));
    }

    #[test]
    fn ragged_distance_input_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pair.json");
        fs::write(&path, r#"{"s1": [["0","0"]], "s2": [["1"]]}"#).unwrap();
        assert!(distance(&path).is_err());
    }
}
