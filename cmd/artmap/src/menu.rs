//! Numbered menus read from stdin.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime};
use configs::Settings;
use services::ArtMapService;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{console, monitor};

const BANNER: &str = r#"
    ╔══════════════════════════════════════════════╗
    ║  🎨 CSS "헤맨만큼 내 땅이다" 관리 시스템     ║
    ╚══════════════════════════════════════════════╝

    선택하세요:
    1. 자동화 시스템 실행 (24/7 모니터링)
    2. 일회성 백업 실행
    3. 현재 통계 분석
    4. 일일 리포트 생성
    5. 행사 당일 모드
    6. 콘텐츠 모더레이션
    0. 종료
"#;

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Current time with the local offset attached.
fn now_here() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

pub struct Prompt<R> {
    lines: Lines<R>,
}

impl Prompt<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines() }
    }

    /// Prints `question` and reads one trimmed line; `None` at end of input.
    pub async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        print!("{question}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }

    pub async fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        Ok(self
            .ask(question)
            .await?
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Monitor,
    Backup,
    Analyze,
    Report,
    EventDay,
    Moderate,
    Exit,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        Some(match input.trim() {
            "1" => MainChoice::Monitor,
            "2" => MainChoice::Backup,
            "3" => MainChoice::Analyze,
            "4" => MainChoice::Report,
            "5" => MainChoice::EventDay,
            "6" => MainChoice::Moderate,
            "0" => MainChoice::Exit,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventChoice {
    LiveStats,
    LivePost,
    Summary,
    Back,
}

impl EventChoice {
    pub fn parse(input: &str) -> Option<Self> {
        Some(match input.trim() {
            "1" => EventChoice::LiveStats,
            "2" => EventChoice::LivePost,
            "3" => EventChoice::Summary,
            "0" => EventChoice::Back,
            _ => return None,
        })
    }
}

/// Shows the main menu once and runs the chosen job.
pub async fn run<R: AsyncBufRead + Unpin>(
    service: &ArtMapService,
    settings: &Settings,
    prompt: &mut Prompt<R>,
) -> anyhow::Result<()> {
    println!("{BANNER}");
    let Some(input) = prompt.ask("선택 (0-6): ").await? else {
        return Ok(());
    };

    match MainChoice::parse(&input) {
        Some(MainChoice::Monitor) => {
            let report_at = NaiveTime::from_hms_opt(settings.schedule.report_hour, 0, 0)
                .ok_or_else(|| anyhow::anyhow!("invalid report hour {}", settings.schedule.report_hour))?;
            monitor::run(service, report_at).await;
        }
        Some(MainChoice::Backup) => match service.backup(now()).await {
            Ok(path) => console::success(format!("백업 완료: {}", path.display())),
            Err(err) => console::failure("백업 실패", &err),
        },
        Some(MainChoice::Analyze) => match service.analyze(now()).await {
            Ok(record) => console::analysis(&record),
            Err(err) => console::failure("분석 실패", &err),
        },
        Some(MainChoice::Report) => match service.daily_report(now()).await {
            Ok(report) => {
                println!("{}", report.text);
                console::success(format!("리포트 저장: {}", report.path.display()));
            }
            Err(err) => console::failure("리포트 생성 실패", &err),
        },
        Some(MainChoice::EventDay) => event_day(service, prompt).await?,
        Some(MainChoice::Moderate) => match service.moderate().await {
            Ok(flagged) => console::flagged(&flagged),
            Err(err) => console::failure("모더레이션 실패", &err),
        },
        Some(MainChoice::Exit) => {}
        None => console::warning(format!("알 수 없는 선택: {input}")),
    }

    println!("\n👋 프로그램을 종료합니다.");
    Ok(())
}

async fn event_day<R: AsyncBufRead + Unpin>(service: &ArtMapService, prompt: &mut Prompt<R>) -> anyhow::Result<()> {
    println!("\n🔴 행사 당일 모드 활성화");
    loop {
        println!("\n1. 실시간 통계 보기\n2. 현장 메시지 게시\n3. 행사 요약 생성\n0. 돌아가기");
        let Some(input) = prompt.ask("선택: ").await? else {
            return Ok(());
        };
        match EventChoice::parse(&input) {
            Some(EventChoice::LiveStats) => match service.live_statistics(now_here()).await {
                Ok(live) => println!("{}", serde_json::to_string_pretty(&live)?),
                Err(err) => console::failure("통계 조회 실패", &err),
            },
            Some(EventChoice::LivePost) => {
                let Some(message) = prompt.ask("현장 메시지: ").await? else {
                    return Ok(());
                };
                let venue = prompt.ask("장소 (기본 코엑스): ").await?.unwrap_or_default();
                let venue = if venue.is_empty() { services::event_day::DEFAULT_VENUE } else { venue.as_str() };
                match service.create_live_event_post(&message, venue).await {
                    Ok(post) => console::success(format!("게시 완료 ({})", post.id)),
                    Err(err) => console::failure("게시 실패", &err),
                }
            }
            Some(EventChoice::Summary) => match service.event_summary(now_here()).await {
                Ok(summary) => println!("{summary}"),
                Err(err) => console::failure("요약 생성 실패", &err),
            },
            Some(EventChoice::Back) => return Ok(()),
            None => console::warning(format!("알 수 없는 선택: {input}")),
        }
    }
}
