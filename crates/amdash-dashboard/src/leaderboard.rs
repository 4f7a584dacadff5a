/*
[INPUT]:  Per-track leaderboard entries from the backend
[OUTPUT]: Ranked rows, a user's standing, and the cross-track overall ranking
[POS]:    Domain layer - leaderboard aggregation
[UPDATE]: When ranking or aggregation rules change
*/

use std::collections::HashMap;

use amdash_adapter::{LeaderboardEntry, LearningApi, Track};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub position: usize,
    pub name: String,
    pub points: i64,
}

/// Positions follow backend order, starting at 1.
pub fn rank_track(entries: &[LeaderboardEntry]) -> Vec<RankedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            position: index + 1,
            name: entry.mentee_name.clone(),
            points: entry.total_points,
        })
        .collect()
}

/// A user's place on one track. `rank` is 0 when they are not listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub points: i64,
}

impl Standing {
    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }
}

pub fn standing_of(entries: &[LeaderboardEntry], name: &str) -> Standing {
    entries
        .iter()
        .position(|entry| entry.mentee_name == name)
        .map(|index| Standing {
            rank: index + 1,
            points: entries[index].total_points,
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackScore {
    pub track: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallEntry {
    pub position: usize,
    pub name: String,
    pub points: i64,
    pub participated_tracks: usize,
    pub track_scores: Vec<TrackScore>,
}

/// Sum every mentee's points across tracks.
///
/// Mentees are keyed by name. Ties keep first-seen order.
pub fn aggregate_overall(per_track: &[(Track, Vec<LeaderboardEntry>)]) -> Vec<OverallEntry> {
    let mut rows: Vec<OverallEntry> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for (track, entries) in per_track {
        for entry in entries {
            let index = *index_by_name
                .entry(entry.mentee_name.as_str())
                .or_insert_with(|| {
                    rows.push(OverallEntry {
                        position: 0,
                        name: entry.mentee_name.clone(),
                        points: 0,
                        participated_tracks: 0,
                        track_scores: Vec::new(),
                    });
                    rows.len() - 1
                });

            let row = &mut rows[index];
            row.points += entry.total_points;
            row.participated_tracks += 1;
            match row.track_scores.iter_mut().find(|s| s.track == track.title) {
                Some(score) => score.points = entry.total_points,
                None => row.track_scores.push(TrackScore {
                    track: track.title.clone(),
                    points: entry.total_points,
                }),
            }
        }
    }

    // sort_by is stable
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index + 1;
    }
    rows
}

/// Fetch every track's leaderboard concurrently and aggregate.
#[instrument(skip(api, tracks), fields(tracks = tracks.len()))]
pub async fn fetch_overall(api: &dyn LearningApi, tracks: &[Track]) -> Result<Vec<OverallEntry>> {
    let boards = try_join_all(tracks.iter().map(|track| async move {
        api.leaderboard(track.id)
            .await
            .with_context(|| format!("leaderboard for track {}", track.id))
            .map(|entries| (track.clone(), entries))
    }))
    .await?;

    let overall = aggregate_overall(&boards);
    debug!(mentees = overall.len(), "overall leaderboard aggregated");
    Ok(overall)
}
