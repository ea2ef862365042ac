//! Draft lifecycle integration tests.
//!
//! These tests drive the orchestrator through complete drafts on a paused
//! clock: pending -> active -> completed, including timer expiry and the
//! automatic pick that follows it.

use std::time::Duration;

use draftroom_core::{
    testing::fixtures, DraftError, DraftStatus, LeagueConfig, Position, PositionCounts,
};

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn roster_of_eleven() -> Vec<(&'static str, &'static str)> {
    vec![
        ("team-1", "c-1"),
        ("team-1", "if-1"),
        ("team-1", "if-2"),
        ("team-1", "if-3"),
        ("team-1", "if-4"),
        ("team-1", "of-1"),
        ("team-1", "of-2"),
        ("team-1", "of-3"),
        ("team-1", "p-1"),
        ("team-1", "p-2"),
        ("team-1", "p-3"),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_start_draft_initial_state() {
    let (orchestrator, _sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));

    let draft = orchestrator.start_draft(60).await;

    assert_eq!(draft.status, DraftStatus::Active);
    assert_eq!(draft.current_pick, 0);
    assert_eq!(draft.seconds_per_pick, 60);
    assert!(draft.picks.is_empty());
    assert_eq!(draft.draft_order, vec!["team-1", "team-2", "team-3", "team-4"]);
    assert!(orchestrator.is_timer_running().await);
    assert_eq!(orchestrator.current_team().await.unwrap().id, "team-1");
}

#[tokio::test(start_paused = true)]
async fn test_manual_pick_updates_everything() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(60).await;

    let pick = orchestrator.attempt_pick("team-2", "if-1").await.unwrap();
    assert_eq!(pick.pick_number, 0);
    assert_eq!(pick.team_id, "team-2");
    assert_eq!(pick.player_name, "Player if-1");
    assert!(!pick.is_automatic);

    let draft = orchestrator.status().await.unwrap();
    assert_eq!(draft.current_pick, 1);
    assert_eq!(draft.picks.len(), 1);

    {
        let ledger = orchestrator.ledger().read().await;
        let player = ledger.get_player("if-1").unwrap();
        assert!(player.is_drafted);
        assert_eq!(player.drafted_by.as_deref(), Some("team-2"));

        let team = ledger.get_team("team-2").unwrap();
        assert_eq!(team.roster, vec!["if-1"]);
        assert_eq!(team.position_counts.get(Position::Infield), 1);
        assert!(ledger.invariants_hold());
    }

    assert_eq!(sink.picks(), vec![pick]);
}

#[tokio::test(start_paused = true)]
async fn test_double_pick_rejected() {
    let (orchestrator, _sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(60).await;

    orchestrator.attempt_pick("team-1", "of-1").await.unwrap();
    let err = orchestrator.attempt_pick("team-2", "of-1").await.unwrap_err();

    assert_eq!(err, DraftError::AlreadyDrafted("of-1".to_string()));
    assert_eq!(orchestrator.status().await.unwrap().current_pick, 1);
    let ledger = orchestrator.ledger().read().await;
    assert!(ledger.get_team("team-2").unwrap().roster.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_position_full_rejected_without_mutation() {
    let (orchestrator, _sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(60).await;

    orchestrator.attempt_pick("team-1", "c-1").await.unwrap();
    let err = orchestrator.attempt_pick("team-1", "c-2").await.unwrap_err();

    assert!(matches!(
        err,
        DraftError::PositionFull { ref team_id, position: Position::Catcher } if team_id == "team-1"
    ));
    assert_eq!(orchestrator.status().await.unwrap().picks.len(), 1);
    let ledger = orchestrator.ledger().read().await;
    assert!(!ledger.get_player("c-2").unwrap().is_drafted);
}

#[tokio::test(start_paused = true)]
async fn test_timer_ticks_count_down() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(3).await;

    advance(3500).await;

    assert_eq!(sink.ticks(), vec![2, 1, 0]);
    assert_eq!(sink.count("time_expired"), 1);
    assert!(sink.picks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timeout_autodrafts_exactly_once() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(2).await;

    // Ticks at 1s and 2s, expiry at 2s, autodraft one second later.
    advance(3500).await;

    let picks = sink.picks();
    assert_eq!(picks.len(), 1);
    assert!(picks[0].is_automatic);
    assert_eq!(picks[0].team_id, "team-1");
    assert_eq!(picks[0].player_id, "if-1");

    let draft = orchestrator.status().await.unwrap();
    assert_eq!(draft.current_pick, 1);
    assert_eq!(draft.status, DraftStatus::Active);
    assert!(orchestrator.is_timer_running().await);
}

#[tokio::test(start_paused = true)]
async fn test_manual_pick_beats_pending_autodraft() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(1).await;

    // Expired at 1s; the autodraft is scheduled for 2s.
    advance(1500).await;
    assert_eq!(sink.count("time_expired"), 1);

    orchestrator.attempt_pick("team-1", "c-1").await.unwrap();

    advance(700).await;

    let picks = sink.picks();
    assert_eq!(picks.len(), 1);
    assert!(!picks[0].is_automatic);
    assert_eq!(orchestrator.status().await.unwrap().current_pick, 1);
}

#[tokio::test(start_paused = true)]
async fn test_roster_capacity_completes_draft() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(60).await;

    for (team, player) in roster_of_eleven() {
        orchestrator.attempt_pick(team, player).await.unwrap();
    }

    let draft = orchestrator.status().await.unwrap();
    assert_eq!(draft.status, DraftStatus::Completed);
    assert_eq!(draft.picks.len(), 11);
    assert_eq!(sink.count("completed"), 1);
    assert!(!orchestrator.is_timer_running().await);
    assert!(orchestrator.current_team().await.is_none());

    let err = orchestrator.attempt_pick("team-2", "c-2").await.unwrap_err();
    assert_eq!(
        err,
        DraftError::NotActive {
            status: DraftStatus::Completed
        }
    );
    assert_eq!(
        orchestrator.autodraft().await.unwrap_err(),
        DraftError::NotActive {
            status: DraftStatus::Completed
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_unattended_draft_fills_designated_roster() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(1).await;

    // Each pick takes one second to expire plus one second of delay.
    advance(30_000).await;

    let draft = orchestrator.status().await.unwrap();
    assert_eq!(draft.status, DraftStatus::Completed);
    assert_eq!(draft.picks.len(), 11);
    assert!(draft.picks.iter().all(|p| p.is_automatic && p.team_id == "team-1"));
    assert!(draft
        .picks
        .iter()
        .enumerate()
        .all(|(i, p)| p.pick_number as usize == i));
    assert_eq!(sink.count("completed"), 1);

    let ledger = orchestrator.ledger().read().await;
    let team = ledger.get_team("team-1").unwrap();
    assert_eq!(team.position_counts, PositionCounts::new(1, 4, 3, 3));
    assert!(ledger.invariants_hold());
}

#[tokio::test(start_paused = true)]
async fn test_empty_pool_timeout_is_absorbed() {
    let (orchestrator, sink) = fixtures::orchestrator(Vec::new());
    orchestrator.start_draft(1).await;

    advance(2500).await;

    assert_eq!(sink.count("time_expired"), 1);
    assert!(sink.picks().is_empty());
    let draft = orchestrator.status().await.unwrap();
    assert_eq!(draft.status, DraftStatus::Active);
    assert_eq!(draft.current_pick, 0);
    assert!(!orchestrator.is_timer_running().await);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_timer() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(1).await;
    orchestrator.attempt_pick("team-3", "p-1").await.unwrap();

    orchestrator.reset_draft().await;
    sink.clear();
    advance(5000).await;

    assert!(sink.events().is_empty());
    assert!(orchestrator.status().await.is_none());
    assert!(!orchestrator.is_timer_running().await);
    let ledger = orchestrator.ledger().read().await;
    assert_eq!(ledger.available_count(), 15);
    assert!(ledger.list_teams().iter().all(|t| t.roster.is_empty()));
}

#[tokio::test(start_paused = true)]
async fn test_restart_replaces_running_draft() {
    let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    let first = orchestrator.start_draft(60).await;
    orchestrator.attempt_pick("team-1", "if-1").await.unwrap();

    advance(500).await;
    let second = orchestrator.start_draft(60).await;
    assert_ne!(first.id, second.id);
    assert_eq!(second.current_pick, 0);

    // The first draft's ticker would have fired at 1s.
    advance(700).await;
    assert!(sink.ticks().is_empty());

    advance(400).await;
    assert_eq!(sink.ticks(), vec![59]);

    let ledger = orchestrator.ledger().read().await;
    assert!(!ledger.get_player("if-1").unwrap().is_drafted);
}

#[tokio::test(start_paused = true)]
async fn test_release_player_returns_to_pool() {
    let (orchestrator, _sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
    orchestrator.start_draft(60).await;
    orchestrator.attempt_pick("team-2", "of-2").await.unwrap();

    orchestrator.release_player("team-2", "of-2").await.unwrap();
    {
        let ledger = orchestrator.ledger().read().await;
        assert!(!ledger.get_player("of-2").unwrap().is_drafted);
        assert!(ledger.invariants_hold());
    }

    let err = orchestrator.release_player("team-2", "of-2").await.unwrap_err();
    assert!(matches!(err, DraftError::NotOnRoster { .. }));

    // The player can be drafted again.
    orchestrator.attempt_pick("team-3", "of-2").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_reflects_rotation() {
    let (orchestrator, _sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));

    let pending = orchestrator.snapshot().await;
    assert!(pending.draft.is_none());
    assert!(pending.current_team.is_none());
    assert_eq!(pending.teams.len(), 4);

    orchestrator.start_draft(60).await;
    orchestrator.attempt_pick("team-1", "p-1").await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.available_players, 14);
    assert_eq!(snapshot.current_team.unwrap().id, "team-2");
    assert_eq!(snapshot.teams[0].roster.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_small_league_completes_on_capacity() {
    let league = LeagueConfig {
        max_positions: PositionCounts::new(1, 1, 1, 1),
        ..LeagueConfig::default()
    };
    let mut config = fixtures::draft_config(60);
    config.roster_capacity = 2;
    let (orchestrator, sink) =
        fixtures::orchestrator_with(fixtures::player_pool(2, 2, 2, 2), league, config);
    orchestrator.start_draft(60).await;

    orchestrator.attempt_pick("team-2", "c-1").await.unwrap();
    assert_eq!(sink.count("completed"), 0);
    orchestrator.attempt_pick("team-2", "if-1").await.unwrap();

    assert_eq!(
        orchestrator.status().await.unwrap().status,
        DraftStatus::Completed
    );
}
