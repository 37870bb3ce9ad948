//! Continuous monitoring: a 60-second tick over the task schedule until
//! Ctrl-C.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime};
use services::{ArtMapService, Schedule, Task};
use tracing::{error, info};

use crate::console;
use crate::menu::now;

const TICK: Duration = Duration::from_secs(60);

/// Monitoring state that outlives a single tick.
#[derive(Default)]
struct MonitorState {
    answered: HashSet<String>,
}

pub async fn run(service: &ArtMapService, report_at: NaiveTime) {
    run_until(service, report_at, tokio::signal::ctrl_c()).await;
}

/// The monitoring loop, stopped when `shutdown` resolves.
async fn run_until<F: Future>(service: &ArtMapService, report_at: NaiveTime, shutdown: F) {
    let started = now();
    let mut schedule = Schedule::standard(started, report_at);
    let mut state = MonitorState::default();

    println!("\n⏰ 자동화 시스템 시작");
    println!("{}", "=".repeat(50));
    for (task, cadence) in schedule.plan() {
        println!("• {task}: {cadence}");
    }
    println!("{}", "=".repeat(50));

    // One listener for the whole loop: once polled, a Ctrl-C that arrives
    // while a task runs is still delivered on the next select.
    tokio::pin!(shutdown);

    for task in Task::STARTUP {
        run_task(service, task, started, &mut state).await;
    }

    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let at = now();
                for task in schedule.due(at) {
                    run_task(service, task, at, &mut state).await;
                }
            }
            _ = &mut shutdown => {
                info!("shutdown requested");
                println!("\n⏹️ 자동화 시스템 종료");
                break;
            }
        }
    }
}

/// Runs one task and reports the outcome. Failures are logged and never
/// stop the loop.
async fn run_task(service: &ArtMapService, task: Task, at: NaiveDateTime, state: &mut MonitorState) {
    info!(%task, "task started");
    let result = match task {
        Task::Backup => service
            .backup(at)
            .await
            .map(|path| console::success(format!("백업 완료: {}", path.display()))),
        Task::Analysis => service.analyze(at).await.map(|record| console::analysis(&record)),
        Task::Moderation => service.moderate().await.map(|flagged| console::flagged(&flagged)),
        Task::AutoRespond => service
            .auto_respond(&mut state.answered)
            .await
            .map(|outcome| console::responded(&outcome)),
        Task::DailyReport => service.daily_report(at).await.map(|report| {
            println!("{}", report.text);
            console::success(format!("리포트 저장: {}", report.path.display()));
        }),
    };

    if let Err(err) = result {
        error!(%task, error = %err, "task failed");
        console::failure(task.name(), &err);
    }
}
