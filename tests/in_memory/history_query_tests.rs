//! Integration tests for history listings and statistics.

use super::helpers::{archive_stack, at, owner, seed_record};

use tasktrail::history::domain::{GroupLabel, HistoryFilter, StatsWindow};
use tasktrail::history::ports::ArchiveRepository;
use tasktrail::history::services::{HistoryQuery, StatsQuery};
use tasktrail::task::domain::TaskPriority;

#[tokio::test(flavor = "multi_thread")]
async fn pagination_envelope_matches_the_seeded_archive() {
    let (repository, _, analytics) = archive_stack();
    for day in 1..=25 {
        seed_record(
            &repository,
            "alice",
            &format!("Task {day:02}"),
            TaskPriority::Medium,
            None,
            at(day, 8),
        )
        .await;
    }

    let query = HistoryQuery {
        page: Some(3),
        limit: Some(10),
        ..HistoryQuery::default()
    };
    let page = analytics
        .get_history(&owner("alice"), &query)
        .await
        .expect("listing should succeed");

    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.entries.len(), 5);
    assert!(!page.has_next);
    assert!(page.has_prev);

    // Newest-first default ordering: the last page holds the oldest five.
    let titles: Vec<&str> = page
        .entries
        .iter()
        .map(|record| record.title().as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Task 05", "Task 04", "Task 03", "Task 02", "Task 01"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn date_window_filters_compose_with_priority() {
    let (repository, _, analytics) = archive_stack();
    seed_record(&repository, "alice", "In window", TaskPriority::High, None, at(10, 9)).await;
    seed_record(&repository, "alice", "Wrong priority", TaskPriority::Low, None, at(10, 10)).await;
    seed_record(&repository, "alice", "Too early", TaskPriority::High, None, at(2, 9)).await;

    let query = HistoryQuery {
        start_date: Some(at(9, 0).date_naive()),
        end_date: Some(at(11, 0).date_naive()),
        priority: Some(TaskPriority::High),
        ..HistoryQuery::default()
    };
    let page = analytics
        .get_history(&owner("alice"), &query)
        .await
        .expect("listing should succeed");

    assert_eq!(page.total, 1);
    assert_eq!(
        page.entries.first().map(|record| record.title().as_str()),
        Some("In window")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn daily_summaries_agree_with_the_window_count() {
    let (repository, _, analytics) = archive_stack();
    seed_record(&repository, "alice", "a", TaskPriority::High, None, at(3, 8)).await;
    seed_record(&repository, "alice", "b", TaskPriority::Low, None, at(3, 20)).await;
    seed_record(&repository, "alice", "c", TaskPriority::Medium, None, at(4, 8)).await;
    seed_record(&repository, "bob", "d", TaskPriority::High, None, at(3, 8)).await;

    let summaries = analytics
        .get_daily_stats(&owner("alice"), &StatsQuery::default())
        .await
        .expect("stats should succeed");

    let summary_total: u64 = summaries.iter().map(|summary| summary.total_completed).sum();
    let count = repository
        .count_by_owner(&owner("alice"), &HistoryFilter::default())
        .await
        .expect("count should succeed");
    assert_eq!(summary_total, count);

    for summary in &summaries {
        assert_eq!(summary.by_priority.total(), summary.total_completed);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn ungrouped_records_surface_under_the_sentinel_label() {
    let (repository, _, analytics) = archive_stack();
    seed_record(&repository, "alice", "a", TaskPriority::Low, None, at(1, 8)).await;
    seed_record(&repository, "alice", "b", TaskPriority::Low, None, at(2, 8)).await;
    seed_record(&repository, "alice", "c", TaskPriority::Low, Some("Errands"), at(3, 8)).await;

    let stats = analytics
        .get_group_stats(&owner("alice"), &StatsQuery::default())
        .await
        .expect("stats should succeed");

    let ungrouped = stats
        .iter()
        .find(|stat| stat.label.as_str() == GroupLabel::UNGROUPED)
        .expect("sentinel bucket present");
    assert_eq!(ungrouped.completed, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn priority_stats_keep_all_three_keys_for_a_quiet_window() {
    let (repository, _, analytics) = archive_stack();
    seed_record(&repository, "alice", "a", TaskPriority::High, None, at(1, 8)).await;

    let quiet = StatsWindow::default()
        .with_start_date(at(20, 0).date_naive())
        .with_end_date(at(25, 0).date_naive());
    let breakdown = analytics
        .get_priority_stats(&owner("alice"), &quiet)
        .await
        .expect("stats should succeed");

    assert_eq!(breakdown.high, 0);
    assert_eq!(breakdown.medium, 0);
    assert_eq!(breakdown.low, 0);
}
