//! Reflection Summary Input
//!
//! Statistics over a milestone and the natural-language prompt assembled
//! from them. The HTTP service forwards the prompt to the language-model API
//! and returns the text; nothing here performs I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Goal, Note, Task, TaskStatus};

/// Body of a summary request: the milestone's tasks and standalone notes
/// plus its goal header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "crate::domain::null_to_empty")]
    pub standalone_notes: Vec<Note>,
    pub goal: Goal,
}

/// One journal line feeding the prompt: a note plus the task it belongs to,
/// if any.
#[derive(Debug, Clone, PartialEq)]
struct JournalLine {
    content: String,
    date: NaiveDate,
    task_title: Option<String>,
}

/// At most this many journal lines are quoted verbatim; the rest are counted.
const MAX_QUOTED_NOTES: usize = 15;

/// Build the reflection prompt from milestone data.
pub fn build_reflection_prompt(request: &SummaryRequest) -> String {
    let completed: Vec<&Task> = by_status(&request.tasks, TaskStatus::Complete);
    let in_progress: Vec<&Task> = by_status(&request.tasks, TaskStatus::InProgress);
    let not_started: Vec<&Task> = by_status(&request.tasks, TaskStatus::NotStarted);

    let mut notes: Vec<JournalLine> = request
        .tasks
        .iter()
        .flat_map(|task| {
            task.notes.iter().map(move |note| JournalLine {
                content: note.content.clone(),
                date: note.date,
                task_title: Some(task.title.clone()),
            })
        })
        .chain(request.standalone_notes.iter().map(|note| JournalLine {
            content: note.content.clone(),
            date: note.date,
            task_title: None,
        }))
        .collect();
    notes.sort_by_key(|line| line.date);

    let (completed_items, total_items) = request
        .tasks
        .iter()
        .fold((0usize, 0usize), |(done, total), task| {
            let (c, t) = task.item_counts();
            (done + c, total + t)
        });
    let completion_rate = if total_items > 0 {
        ((completed_items as f64 / total_items as f64) * 100.0).round() as u32
    } else {
        0
    };

    let completed_lines = completed
        .iter()
        .map(|task| {
            if task.subtasks.is_empty() {
                format!("- {}", task.title)
            } else {
                format!(
                    "- {} ({}/{} subtasks)",
                    task.title,
                    task.completed_subtasks(),
                    task.subtasks.len()
                )
            }
        })
        .collect::<Vec<_>>();

    let note_lines = notes
        .iter()
        .take(MAX_QUOTED_NOTES)
        .map(|line| match &line.task_title {
            Some(task) => format!("- [{}] ({}): \"{}\"", line.date, task, line.content),
            None => format!("- [{}]: \"{}\"", line.date, line.content),
        })
        .collect::<Vec<_>>();
    let overflow = if notes.len() > MAX_QUOTED_NOTES {
        format!("\n... and {} more notes", notes.len() - MAX_QUOTED_NOTES)
    } else {
        String::new()
    };

    format!(
        "You are helping someone reflect on their goal-tracking milestone. Here's their data:\n\n\
         **Goal:** {goal}\n\
         **Period:** {start} to {end}\n\
         **Overall Completion:** {rate}% ({done}/{total} items)\n\n\
         **Completed Tasks ({n_completed}):**\n{completed}\n\n\
         **In Progress ({n_progress}):**\n{in_progress}\n\n\
         **Not Started ({n_not_started}):**\n{not_started}\n\n\
         **Journal Notes ({n_notes} entries):**\n{notes}{overflow}\n\n\
         Please write a warm, reflective summary (3-4 paragraphs) that:\n\
         1. Celebrates what was accomplished\n\
         2. Notes any patterns or themes from the notes and tasks\n\
         3. Gently acknowledges what didn't get done without being critical\n\
         4. Offers an encouraging perspective on the journey\n\n\
         Keep the tone personal, warm, and supportive, like a thoughtful friend helping them \
         reflect. Don't use bullet points. Don't start with \"Great job!\" or similar. Be genuine \
         and specific to their actual accomplishments.",
        goal = request.goal.title,
        start = long_date(request.goal.start_date, false),
        end = long_date(request.goal.end_date, true),
        rate = completion_rate,
        done = completed_items,
        total = total_items,
        n_completed = completed.len(),
        completed = or_none(completed_lines),
        n_progress = in_progress.len(),
        in_progress = or_none(titles(&in_progress)),
        n_not_started = not_started.len(),
        not_started = or_none(titles(&not_started)),
        n_notes = notes.len(),
        notes = if note_lines.is_empty() {
            "(no notes)".to_string()
        } else {
            note_lines.join("\n")
        },
        overflow = overflow,
    )
}

fn by_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| format!("- {}", t.title)).collect()
}

fn or_none(lines: Vec<String>) -> String {
    if lines.is_empty() {
        "(none)".to_string()
    } else {
        lines.join("\n")
    }
}

/// "January 5" or, with the year, "January 5, 2026"
fn long_date(date: NaiveDate, with_year: bool) -> String {
    if with_year {
        date.format("%B %-d, %Y").to_string()
    } else {
        date.format("%B %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subtask;

    fn request() -> SummaryRequest {
        let mut done = Task::new("t1".into(), "Book flights".into());
        done.status = TaskStatus::Complete;
        done.subtasks.push(Subtask {
            id: "t1-1".into(),
            title: "Compare fares".into(),
            status: TaskStatus::Complete,
        });

        let mut doing = Task::new("t2".into(), "Learn phrases".into());
        doing.status = TaskStatus::InProgress;
        doing.notes.push(Note::new(
            "n1".into(),
            "15 min a day is working".into(),
            "2026-01-05".parse().unwrap(),
            "2026-01-05T08:00:00Z".into(),
        ));

        SummaryRequest {
            tasks: vec![done, doing, Task::new("t3".into(), "Get insurance".into())],
            standalone_notes: vec![Note::new(
                "sn1".into(),
                "Feeling good about the plan".into(),
                "2026-01-02".parse().unwrap(),
                "2026-01-02T09:00:00Z".into(),
            )],
            goal: Goal {
                title: "Japan Trip".into(),
                start_date: "2026-01-01".parse().unwrap(),
                end_date: "2026-02-15".parse().unwrap(),
            },
        }
    }

    #[test]
    fn test_prompt_carries_stats_and_buckets() {
        let prompt = build_reflection_prompt(&request());
        assert!(prompt.contains("**Goal:** Japan Trip"));
        assert!(prompt.contains("**Period:** January 1 to February 15, 2026"));
        // Items: t1 + its subtask complete, t2 and t3 plus nothing else.
        assert!(prompt.contains("(2/4 items)"));
        assert!(prompt.contains("**Completed Tasks (1):**\n- Book flights (1/1 subtasks)"));
        assert!(prompt.contains("**In Progress (1):**\n- Learn phrases"));
        assert!(prompt.contains("**Not Started (1):**\n- Get insurance"));
    }

    #[test]
    fn test_prompt_merges_notes_chronologically() {
        let prompt = build_reflection_prompt(&request());
        let standalone = prompt.find("Feeling good about the plan").unwrap();
        let task_note = prompt.find("15 min a day is working").unwrap();
        assert!(standalone < task_note);
        assert!(prompt.contains("(Learn phrases): \"15 min a day is working\""));
    }

    #[test]
    fn test_prompt_with_no_tasks_reads_none() {
        let request = SummaryRequest {
            tasks: Vec::new(),
            standalone_notes: Vec::new(),
            goal: Goal {
                title: "Empty".into(),
                start_date: "2026-01-01".parse().unwrap(),
                end_date: "2026-01-07".parse().unwrap(),
            },
        };
        let prompt = build_reflection_prompt(&request);
        assert!(prompt.contains("0% (0/0 items)"));
        assert!(prompt.contains("**Completed Tasks (0):**\n(none)"));
        assert!(prompt.contains("(no notes)"));
    }

    #[test]
    fn test_note_overflow_is_counted_not_quoted() {
        let mut req = request();
        for i in 0..20 {
            req.standalone_notes.push(Note::new(
                format!("x{}", i),
                format!("entry {}", i),
                "2026-01-10".parse().unwrap(),
                "2026-01-10T09:00:00Z".into(),
            ));
        }
        let prompt = build_reflection_prompt(&req);
        assert!(prompt.contains("... and 7 more notes"));
    }
}
