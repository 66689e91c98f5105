use dotacup::bracket::BracketStore;
use dotacup::fantasy::FantasyStore;
use dotacup::leaderboard::LeaderboardStore;
use dotacup::season::SeasonStatsStore;
use dotacup::standings::{GroupStore, HeadToHead};
use dotacup::tournament::models::{Game, Role};
use dotacup::unparsed::UnparsedQueue;
use dotacup::{MatchStore, Stage};

mod utils;

use utils::*;

fn game(id: &str, match_id: &str, opendota_match_id: i64, number: u8) -> Game {
    Game {
        id: id.to_string(),
        match_id: match_id.to_string(),
        opendota_match_id,
        game_number: number,
        stats: None,
    }
}

#[tokio::test]
async fn group_result_flows_through_standings_fantasy_and_leaderboard() {
    let setup = EngineSetup::new();
    setup
        .groups
        .upsert_group(group_of("group-a", &["alpha", "beta"]))
        .await
        .unwrap();
    setup
        .matches
        .upsert_player(player("p1", "alpha", Role::Carry, 101))
        .await
        .unwrap();
    setup
        .fantasy
        .upsert_lineup(dotacup::fantasy::FantasyLineup {
            user_id: "u1".to_string(),
            player_ids: vec!["p1".to_string()],
        })
        .await
        .unwrap();

    // alpha takes the series 2:1; p1 plays radiant in every game
    let mut m1 = series("m1", "round-1", Some("group-a"), "alpha", 2, "beta", 1);
    m1.game_ids = vec!["g1".to_string(), "g2".to_string(), "g3".to_string()];
    setup.matches.upsert_match(m1).await.unwrap();
    for (g, od, won, kills) in [
        ("g1", 1001, true, 4),
        ("g2", 1002, false, 2),
        ("g3", 1003, true, 6),
    ] {
        let mut game = game(g, "m1", od, (od - 1000) as u8);
        game.stats = Some(parsed_stats(od, won, &[(101, 0, kills)]));
        setup.matches.upsert_game(game).await.unwrap();
    }

    let report = setup.orchestrator.match_updated("m1").await.unwrap();
    assert!(report.success());

    let group = setup.groups.get_group("group-a").await.unwrap().unwrap();
    let alpha = &group.standings[0];
    assert_eq!(alpha.team_id, "alpha");
    assert_eq!(alpha.wins, 1);
    assert_eq!(alpha.points, 2);
    assert_eq!(alpha.score_diff, 1);
    assert_eq!(alpha.head_to_head.get("beta"), Some(&HeadToHead::Win));
    let beta = &group.standings[1];
    assert_eq!(beta.losses, 1);
    assert_eq!(beta.score_diff, -1);

    // carry: kills at 2.5 each, win bonus for the two games alpha won
    // g1 = 4*2.5 + 10, g2 = 2*2.5, g3 = 6*2.5 + 10
    let scores = setup.fantasy.list_round_scores("round-1").await.unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].user_id, "u1");
    assert_eq!(scores[0].score, 50.0);
    assert_eq!(scores[0].games_counted, 3);

    let summaries = setup.leaderboard.list_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_score, 50.0);
    assert_eq!(summaries[0].rank, 1);
}

#[tokio::test]
async fn repeated_recalculation_is_idempotent() {
    let setup = EngineSetup::new();
    setup
        .groups
        .upsert_group(group_of("group-a", &["alpha", "beta"]))
        .await
        .unwrap();
    setup
        .matches
        .upsert_match(series("m1", "round-1", Some("group-a"), "alpha", 2, "beta", 0))
        .await
        .unwrap();

    setup.orchestrator.match_updated("m1").await.unwrap();
    let first = setup.groups.get_group("group-a").await.unwrap().unwrap();

    setup.orchestrator.match_updated("m1").await.unwrap();
    let second = setup.groups.get_group("group-a").await.unwrap().unwrap();
    assert_eq!(first.standings, second.standings);
    assert_eq!(second.standings[0].wins, 1);
}

#[tokio::test]
async fn unparsed_game_is_queued_then_scored_after_retry() {
    let setup = EngineSetup::new();
    setup
        .groups
        .upsert_group(group_of("group-a", &["alpha", "beta"]))
        .await
        .unwrap();
    setup
        .matches
        .upsert_player(player("p1", "alpha", Role::Carry, 101))
        .await
        .unwrap();
    setup
        .fantasy
        .upsert_lineup(dotacup::fantasy::FantasyLineup {
            user_id: "u1".to_string(),
            player_ids: vec!["p1".to_string()],
        })
        .await
        .unwrap();

    let mut m1 = series("m1", "round-1", Some("group-a"), "alpha", 2, "beta", 0);
    m1.game_ids = vec!["g1".to_string(), "g2".to_string()];
    setup.matches.upsert_match(m1).await.unwrap();

    let mut g1 = game("g1", "m1", 2001, 1);
    g1.stats = Some(parsed_stats(2001, true, &[(101, 0, 4)]));
    setup.matches.upsert_game(g1).await.unwrap();
    // g2's replay has not been parsed upstream yet
    setup.matches.upsert_game(game("g2", "m1", 2002, 2)).await.unwrap();

    let report = setup.orchestrator.match_updated("m1").await.unwrap();
    assert!(report.success());
    assert_eq!(report.stage(Stage::UnparsedEnqueue).unwrap().processed, 1);
    assert_eq!(report.stage(Stage::Fantasy).unwrap().processed, 1);
    assert_eq!(report.stage(Stage::Fantasy).unwrap().skipped, 1);

    // only the parsed game scored: 4 kills * 2.5 + win bonus
    let scores = setup.fantasy.list_round_scores("round-1").await.unwrap();
    assert_eq!(scores[0].score, 20.0);
    assert_eq!(scores[0].games_counted, 1);
    let queued = setup.queue.list().await.unwrap();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].opendota_match_id, 2002);

    // upstream finishes parsing; the sweep picks it up and rescores the round
    setup
        .provider
        .push(2002, Ok(parsed_stats(2002, true, &[(101, 0, 8)])));
    let sweep = setup.orchestrator.retry_unparsed_games().await.unwrap();
    assert_eq!(sweep.retry.parsed_count, 1);
    assert_eq!(sweep.retry.parsed_rounds, vec!["round-1".to_string()]);

    let scores = setup.fantasy.list_round_scores("round-1").await.unwrap();
    assert_eq!(scores[0].score, 50.0);
    assert_eq!(scores[0].games_counted, 2);
    assert_eq!(
        setup.leaderboard.list_summaries().await.unwrap()[0].total_score,
        50.0
    );
    assert_eq!(setup.orchestrator.check_unparsed_games().await.unwrap().total, 0);
}

#[tokio::test]
async fn bracket_winners_advance_and_corrections_propagate() {
    let setup = EngineSetup::new();
    let m1 = series("m1", "semis", None, "alpha", 2, "beta", 0);
    let m2 = series("m2", "semis", None, "gamma", 2, "delta", 1);
    setup
        .brackets
        .upsert_bracket(bracket_with_final("playoffs", &m1, &m2, "mf"))
        .await
        .unwrap();
    setup.matches.upsert_match(m1).await.unwrap();
    setup.matches.upsert_match(m2).await.unwrap();
    setup.matches.upsert_match(pending("mf", "final")).await.unwrap();

    let report = setup.orchestrator.match_updated("m1").await.unwrap();
    assert!(report.success());

    let bracket = setup.brackets.get_bracket("playoffs").await.unwrap().unwrap();
    assert_eq!(bracket.slot("s1").unwrap().winner.as_ref().unwrap().id, "alpha");
    assert_eq!(bracket.slot("s2").unwrap().winner.as_ref().unwrap().id, "gamma");
    assert!(bracket.slot("sf").unwrap().winner.is_none());

    let mf = setup.matches.get_match("mf").await.unwrap().unwrap();
    assert_eq!(mf.side_a.team.as_ref().unwrap().id, "alpha");
    assert_eq!(mf.side_b.team.as_ref().unwrap().id, "gamma");

    // scoring correction: the semifinal actually went to beta
    setup
        .matches
        .upsert_match(series("m1", "semis", None, "alpha", 0, "beta", 2))
        .await
        .unwrap();
    setup.orchestrator.match_updated("m1").await.unwrap();

    let bracket = setup.brackets.get_bracket("playoffs").await.unwrap().unwrap();
    assert_eq!(bracket.slot("s1").unwrap().winner.as_ref().unwrap().id, "beta");
    let mf = setup.matches.get_match("mf").await.unwrap().unwrap();
    assert_eq!(mf.side_a.team.as_ref().unwrap().id, "beta");
}

#[tokio::test]
async fn full_rebuild_and_comprehensive_stats_cover_the_season() {
    let setup = EngineSetup::new();
    setup
        .groups
        .upsert_group(group_of("group-a", &["alpha", "beta", "gamma"]))
        .await
        .unwrap();
    setup
        .matches
        .upsert_player(player("p1", "alpha", Role::Carry, 101))
        .await
        .unwrap();

    let mut m1 = series("m1", "round-1", Some("group-a"), "alpha", 2, "beta", 0);
    m1.game_ids = vec!["g1".to_string()];
    setup.matches.upsert_match(m1).await.unwrap();
    setup
        .matches
        .upsert_match(series("m2", "round-2", Some("group-a"), "gamma", 2, "alpha", 1))
        .await
        .unwrap();
    let mut g1 = game("g1", "m1", 3001, 1);
    g1.stats = Some(parsed_stats(3001, true, &[(101, 0, 9)]));
    setup.matches.upsert_game(g1).await.unwrap();

    let report = setup.orchestrator.full_rebuild().await.unwrap();
    assert!(report.success());
    assert_eq!(report.stage(Stage::Standings).unwrap().processed, 2);

    let group = setup.groups.get_group("group-a").await.unwrap().unwrap();
    assert_eq!(group.standings.len(), 3);
    assert_eq!(group.standings[0].team_id, "gamma");

    let report = setup.orchestrator.recalc_comprehensive_stats().await.unwrap();
    assert!(report.success());

    let stats = setup.season.get().await.unwrap().unwrap();
    assert_eq!(stats.matches_counted, 2);
    assert_eq!(stats.games_counted, 1);
    let alpha = stats.teams.iter().find(|t| t.team_id == "alpha").unwrap();
    assert_eq!(alpha.match_wins, 1);
    assert_eq!(alpha.match_losses, 1);
    assert_eq!(alpha.game_wins, 3);
    let p1 = stats.players.iter().find(|p| p.player_id == "p1").unwrap();
    assert_eq!(p1.kills, 9);
    assert_eq!(p1.best_kills, 9);
}
