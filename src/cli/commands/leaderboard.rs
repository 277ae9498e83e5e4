use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::leaderboard;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_streak};
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Utc};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Leaderboard { course } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let board = leaderboard::leaderboard(&pool.conn, course, now)?;

        println!(
            "\n🏆 {} — {} past lectures\n",
            board.course_code, board.total_past_lectures
        );

        if board.rows.is_empty() {
            println!("No enrolled students.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("#", 3),
            Column::new("STUDENT", 12),
            Column::new("NAME", 16),
            Column::new("ATTENDED", 8),
            Column::new("STREAK", 6),
        ]);

        for (rank, row) in board.rows.iter().enumerate() {
            table.add_row(vec![
                (rank + 1).to_string(),
                row.student_id.clone(),
                row.username.clone(),
                row.attended_count.to_string(),
                format!(
                    "{}{}{}",
                    color_for_streak(row.current_streak),
                    row.current_streak,
                    RESET
                ),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
