//! Polling schedule for the monitoring loop.
//!
//! Each task keeps its own next-fire instant. A tick runs every task whose
//! instant has passed exactly once, then moves the instant forward along the
//! task's own grid to the first slot after the tick. Late ticks do not drift
//! the grid and a stalled loop never replays missed runs.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Backup,
    Analysis,
    Moderation,
    AutoRespond,
    DailyReport,
}

impl Task {
    /// Tasks run once when monitoring starts, before the first tick.
    pub const STARTUP: [Task; 3] = [Task::Backup, Task::Analysis, Task::Moderation];

    pub fn name(self) -> &'static str {
        match self {
            Task::Backup => "backup",
            Task::Analysis => "analysis",
            Task::Moderation => "moderation",
            Task::AutoRespond => "auto_respond",
            Task::DailyReport => "daily_report",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Every(TimeDelta),
    /// Once a day at this local wall-clock time
    DailyAt(NaiveTime),
}

impl Cadence {
    /// First fire strictly after `now`.
    pub fn next_after(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Cadence::Every(interval) => now + interval,
            Cadence::DailyAt(at) => {
                let today = now.date().and_time(at);
                if today > now {
                    today
                } else {
                    today + TimeDelta::days(1)
                }
            }
        }
    }
}

impl Cadence {
    /// Next fire after `now` on the grid that `fired` belongs to.
    fn advance(self, fired: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Cadence::Every(interval) if interval > TimeDelta::zero() => {
                let mut next = fired + interval;
                if next <= now {
                    let behind = (now - next).num_milliseconds() / interval.num_milliseconds();
                    next += interval * (behind as i32 + 1);
                }
                next
            }
            _ => self.next_after(now),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Every(interval) if interval.num_minutes() % 60 == 0 => {
                write!(f, "every {}h", interval.num_hours())
            }
            Cadence::Every(interval) => write!(f, "every {}m", interval.num_minutes()),
            Cadence::DailyAt(at) => write!(f, "daily at {}", at.format("%H:%M")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    task: Task,
    cadence: Cadence,
    next_fire: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    /// The standard plan: hourly backup, analysis every 30 minutes,
    /// moderation every 10, auto-respond every 15 and the daily report at
    /// `report_at`.
    pub fn standard(now: NaiveDateTime, report_at: NaiveTime) -> Self {
        Self::new(
            now,
            [
                (Task::Backup, Cadence::Every(TimeDelta::hours(1))),
                (Task::Analysis, Cadence::Every(TimeDelta::minutes(30))),
                (Task::Moderation, Cadence::Every(TimeDelta::minutes(10))),
                (Task::DailyReport, Cadence::DailyAt(report_at)),
                (Task::AutoRespond, Cadence::Every(TimeDelta::minutes(15))),
            ],
        )
    }

    pub fn new(now: NaiveDateTime, plan: impl IntoIterator<Item = (Task, Cadence)>) -> Self {
        let entries = plan
            .into_iter()
            .map(|(task, cadence)| Entry {
                task,
                cadence,
                next_fire: cadence.next_after(now),
            })
            .collect();
        Self { entries }
    }

    /// Tasks due at `now`, in plan order. Each due task runs once, however
    /// many of its slots have passed.
    pub fn due(&mut self, now: NaiveDateTime) -> Vec<Task> {
        let mut due = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| e.next_fire <= now) {
            due.push(entry.task);
            entry.next_fire = entry.cadence.advance(entry.next_fire, now);
        }
        due
    }

    pub fn next_fire(&self, task: Task) -> Option<NaiveDateTime> {
        self.entries.iter().find(|e| e.task == task).map(|e| e.next_fire)
    }

    pub fn plan(&self) -> impl Iterator<Item = (Task, Cadence)> + '_ {
        self.entries.iter().map(|e| (e.task, e.cadence))
    }
}
