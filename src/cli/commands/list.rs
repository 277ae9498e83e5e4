use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, color_for_attended};
use crate::utils::table::{Column, Table};
use crate::utils::time::fmt_utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { student, course } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let user = queries::student(&pool.conn, student)?
            .ok_or_else(|| AppError::UnknownStudent(student.clone()))?;

        let history = queries::enrollment_history(&pool.conn, student, course.as_deref())?;

        if history.is_empty() {
            println!("No enrollments for {}", student);
            return Ok(());
        }

        println!(
            "\n📚 {} ({}) — streak {} (best {})\n",
            user.username, user.student_id, user.current_streak, user.longest_streak
        );

        let mut table = Table::new(vec![
            Column::new("LECTURE", 7),
            Column::new("MODULE", 24),
            Column::new("START", 20),
            Column::new("ATTENDED", 8),
        ]);

        for entry in &history {
            let marker = if entry.attended { "yes" } else { "-" };
            table.add_row(vec![
                entry.lecture.id.to_string(),
                entry.module_name.clone(),
                fmt_utc(entry.lecture.start_time),
                format!(
                    "{}{}{}",
                    color_for_attended(entry.attended),
                    marker,
                    RESET
                ),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
