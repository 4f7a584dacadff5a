/*
[INPUT]:  Optional track id as first CLI argument
[OUTPUT]: Tracks, tasks and leaderboard printed to stdout
[POS]:    Examples - public curriculum queries
[UPDATE]: When adding new curriculum endpoints
*/

use amdash_adapter::*;

/// Example: browse tracks, tasks and the leaderboard (no login required)
#[tokio::main]
async fn main() {
    println!("=== amdash Track Overview Example ===\n");

    let client = match AmdashClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created against {}\n", client.base_url());

    let tracks = match client.tracks().await {
        Ok(tracks) => tracks,
        Err(e) => {
            println!("✗ Error listing tracks: {}", e);
            return;
        }
    };
    for track in &tracks {
        println!("  [{}] {}", track.id, track.title);
    }

    let track_id = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<i64>().ok())
        .or_else(|| tracks.first().map(|track| track.id));
    let Some(track_id) = track_id else {
        println!("\nNo tracks available");
        return;
    };

    println!("\nTasks in track {}...", track_id);
    match client.tasks(track_id).await {
        Ok(tasks) => {
            for task in tasks {
                let deadline = task
                    .deadline
                    .map(|days| format!("{days}d"))
                    .unwrap_or_else(|| "none".to_string());
                println!(
                    "  #{:<3} {:<40} {:>4} pts  deadline {}",
                    task.task_no + 1,
                    task.title,
                    task.points,
                    deadline
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nLeaderboard for track {}...", track_id);
    match client.leaderboard(track_id).await {
        Ok(board) => {
            for (index, entry) in board.iter().enumerate() {
                println!("  {:>2}. {:<30} {}", index + 1, entry.mentee_name, entry.total_points);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Track overview example complete");
}
