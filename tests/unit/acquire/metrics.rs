use super::*;
use crate::oracle::scripted::ScriptedOracle;

#[test]
fn sorry_reply_is_declined_with_no_pairs() {
    let oracle = ScriptedOracle::new(["Sorry, I don't know"]);
    let fetch = fetch_year(&oracle, "Testland", Year(2011));
    assert!(!fetch.is_success());
    assert!(fetch.pairs().is_empty());
    assert!(matches!(
        fetch,
        YearFetch::Failed {
            failure: FetchFailure::Declined { .. },
            ..
        }
    ));
}

#[test]
fn failure_phrase_anywhere_declines() {
    let reply = "A:100\nUnfortunately I only have partial data.\nB:200";
    assert!(matches!(
        parse_year_reply(reply),
        Err(FetchFailure::Declined { .. })
    ));
}

#[test]
fn plain_millions_parse() {
    let pairs = parse_year_reply("Andalusia:160,000\nAragon: 37,000.5 million USD\nMurcia:$30000").unwrap();
    assert_eq!(
        pairs,
        vec![
            ("Andalusia".to_string(), 160_000.0),
            ("Aragon".to_string(), 37_000.5),
            ("Murcia".to_string(), 30_000.0),
        ]
    );
}

#[test]
fn billions_scale_by_thousand() {
    let millions = parse_year_reply("A:2").unwrap();
    let billions = parse_year_reply("A:2 billion").unwrap();
    assert_eq!(billions[0].1, millions[0].1 * 1000.0);
}

#[test]
fn billion_scales_only_its_own_line() {
    let pairs = parse_year_reply("A:100\nB:2 billion").unwrap();
    assert_eq!(
        pairs,
        vec![("A".to_string(), 100.0), ("B".to_string(), 2000.0)]
    );
}

#[test]
fn blank_line_inside_reply_is_malformed() {
    assert!(matches!(
        parse_year_reply("A:100\n\nB:200"),
        Err(FetchFailure::Malformed(_))
    ));
    assert!(matches!(
        parse_year_reply("A:100\nx\nB:200"),
        Err(FetchFailure::Malformed(_))
    ));
    // Surrounding blank lines are not part of the reply.
    assert_eq!(parse_year_reply("\n A:100 \n\n").unwrap().len(), 1);
}

#[test]
fn unit_words_never_touch_state_names() {
    let pairs = parse_year_reply("Billionton:5 Billion USD").unwrap();
    assert_eq!(pairs[0].0, "Billionton");
    assert_eq!(pairs[0].1, 5000.0);
}

#[test]
fn line_without_colon_fails_without_panicking() {
    let oracle = ScriptedOracle::new(["A:100\nHere are the values you asked for\nB:3"]);
    let fetch = fetch_year(&oracle, "Testland", Year(2010));
    assert!(matches!(
        fetch,
        YearFetch::Failed {
            failure: FetchFailure::Malformed(_),
            ..
        }
    ));
    assert!(fetch.pairs().is_empty());
}

#[test]
fn extra_colon_and_non_numeric_fail() {
    assert!(matches!(
        parse_year_reply("A:1:2"),
        Err(FetchFailure::Malformed(_))
    ));
    assert!(matches!(
        parse_year_reply("A:lots"),
        Err(FetchFailure::Malformed(_))
    ));
    assert!(matches!(
        parse_year_reply(":5"),
        Err(FetchFailure::Malformed(_))
    ));
    assert!(matches!(
        parse_year_reply("A:-5"),
        Err(FetchFailure::Malformed(_))
    ));
}

#[test]
fn empty_reply_is_its_own_failure() {
    assert_eq!(parse_year_reply("  \n \n"), Err(FetchFailure::Empty));
}

#[test]
fn oracle_error_is_contained() {
    let oracle = ScriptedOracle::default();
    oracle.push_failure("timed out");
    let fetch = fetch_year(&oracle, "Testland", Year(2015));
    assert_eq!(fetch.year(), Year(2015));
    assert!(matches!(
        fetch,
        YearFetch::Failed {
            failure: FetchFailure::Oracle(_),
            ..
        }
    ));
}

#[test]
fn fetched_records_carry_year() {
    let oracle = ScriptedOracle::new(["A:1\nB:2"]);
    let fetch = fetch_year(&oracle, "Testland", Year(2012));
    let YearFetch::Fetched { records, .. } = &fetch else {
        panic!("expected success, got {fetch:?}");
    };
    assert!(records.iter().all(|r| r.year == Year(2012)));
    assert_eq!(fetch.pairs(), vec![("A", 1.0), ("B", 2.0)]);
    assert!(oracle.prompts()[0].contains("2012"));
}
