use anyhow::Result;
use nfgrapher_score::{
    load_score, parse_score, parse_score_str, Graph, LoadingPolicy, Score, ScoreError, Version,
};
use pretty_assertions::assert_eq;

const FADE_IN: &str = include_str!("fixtures/fade_in.json");
const SIDECHAIN: &str = include_str!("fixtures/sidechain.json");

#[test]
fn fixtures_round_trip() -> Result<()> {
    for fixture in [FADE_IN, SIDECHAIN] {
        let score = parse_score_str(fixture)?;
        assert_eq!(parse_score_str(&score.to_json()?)?, score);
        assert_eq!(parse_score(score.to_json_pretty()?.as_bytes())?, score);
    }
    Ok(())
}

#[test]
fn fixture_contents_are_preserved() -> Result<()> {
    let score = parse_score_str(FADE_IN)?;
    assert_eq!(score.graph.loading_policy, Some(LoadingPolicy::SomeContentPlaythrough));
    assert_eq!(score.graph.nodes().len(), 2);
    assert_eq!(score.graph.edges()[0].source, "track");
    assert_eq!(score.graph.scripts()[0].name, "ready");

    let fade = score.graph.node("fade").expect("fade node");
    assert_eq!(fade.config, None);
    assert_eq!(fade.param_commands("gain").map(<[_]>::len), Some(2));
    Ok(())
}

#[test]
fn load_score_reads_files() -> Result<()> {
    let path = std::env::temp_dir().join(format!("nfgrapher-score-{}.json", std::process::id()));
    std::fs::write(&path, SIDECHAIN)?;
    let score = load_score(&path);
    std::fs::remove_file(&path)?;
    assert_eq!(score?, parse_score_str(SIDECHAIN)?);
    Ok(())
}

#[test]
fn structural_errors_are_malformed() {
    for text in [
        "",
        "[]",
        r#"{ "version": "1.2.12" }"#,
        r#"{ "version": "1.2.12", "graph": { "id": "g", "nodes": [{ "id": "n" }] } }"#,
        r#"{ "version": "1.2.12", "graph": { "id": "g", "nodes": [{ "id": "n", "kind": "k", "params": { "p": [{}] } }] } }"#,
    ] {
        assert!(
            matches!(parse_score_str(text), Err(ScoreError::Malformed(_))),
            "expected malformed document for {text:?}"
        );
    }
}

#[test]
fn versions_parse_and_stamp() -> Result<()> {
    let score = parse_score_str(SIDECHAIN)?;
    let version = score.parsed_version()?;
    assert_eq!((version.major, version.minor, version.patch), (1, 2, 12));
    assert_eq!(version.prerelease, vec!["beta".to_string(), "1".to_string()]);
    assert_eq!(version.to_string(), "1.2.12-beta.1+build.7");

    let fresh = Score::new(Graph::new("empty"));
    assert_eq!(fresh.parsed_version()?, Version::CURRENT);
    assert_eq!(
        serde_json::to_value(&fresh)?,
        serde_json::json!({ "graph": { "id": "empty" }, "version": "1.2.12" })
    );

    let bad = Score {
        version: "one.two".to_string(),
        ..fresh
    };
    assert!(matches!(bad.parsed_version(), Err(ScoreError::InvalidVersion(_))));
    Ok(())
}
