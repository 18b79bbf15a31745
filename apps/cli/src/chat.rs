//! Interactive chat loop.
//!
//! A REPL-style interface over one `ConversationSession`: user turns go
//! through submit, slash-commands drive the toggles, and while monologue
//! mode is running each loop iteration produces one self-generated turn
//! before prompting again (the pause between turns lives here, not in the
//! session).

use anyhow::Result;
use colored::Colorize;
use mirror_abstraction::{GenerationOptions, Model};
use mirror_core::{ConversationSession, Role, Speaker, TranscriptEntry, TranscriptLog};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Runs the chat loop until the user quits or stdin closes.
pub async fn execute(
    model: Arc<dyn Model + Send + Sync>,
    options: GenerationOptions,
    mut mirror_enabled: bool,
    mut speech_enabled: bool,
    log_dir: &Path,
) -> Result<()> {
    let mut session = ConversationSession::new();
    let mut log = TranscriptLog::create(log_dir);
    let speaker = Speaker::detect();

    print_banner(model.model_id(), mirror_enabled, speech_enabled, &log, &speaker);

    loop {
        // One monologue turn per iteration while the flag is running; the
        // cadence delay belongs to this loop, never to the session.
        if session.is_monologue_running() {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let entry = session.tick(&options, mirror_enabled, model.as_ref()).await;
            print_entry(&entry);
            log.log_monologue(&entry.text);
            if speech_enabled {
                speaker.speak(&entry.text);
            }
        }

        print!("\n{} ", ">".green().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" | "/q" => {
                match log.path() {
                    Some(path) => println!("\n대화를 종료합니다. 기록: {}", path.display()),
                    None => println!("\n대화를 종료합니다."),
                }
                break;
            }
            "/help" | "/h" => {
                print_help();
                continue;
            }
            "/history" => {
                print_history(session.transcript());
                continue;
            }
            "/mirror" => {
                mirror_enabled = !mirror_enabled;
                println!("거울상 모드: {}", on_off(mirror_enabled));
                continue;
            }
            "/speak" => {
                speech_enabled = !speech_enabled;
                println!("음성 낭독: {}", on_off(speech_enabled));
                if speech_enabled && !speaker.is_available() {
                    println!("{}", "이 시스템에서 사용할 수 있는 음성 엔진이 없습니다.".yellow());
                }
                continue;
            }
            "/mono" => {
                session.start_monologue();
                println!("혼잣말 모드 실행 중... (/stop 으로 멈춤)");
                continue;
            }
            "/stop" => {
                session.stop_monologue();
                println!("혼잣말 모드를 멈췄습니다.");
                continue;
            }
            _ => {}
        }

        let appended =
            session.submit(input, &options, mirror_enabled, model.as_ref()).await;
        for entry in &appended {
            print_entry(entry);
        }

        if let [user, assistant] = &appended[..] {
            log.log_exchange(&user.text, &assistant.text);
        }
        if speech_enabled {
            if let Some(assistant) = appended.last() {
                speaker.speak(&assistant.text);
            }
        }
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "켜짐" } else { "꺼짐" }
}

fn print_entry(entry: &TranscriptEntry) {
    match entry.role {
        Role::User => println!("\n{} {}", "👤 사용자:".green().bold(), entry.text),
        Role::Assistant => println!("\n{} {}", "🤖 어시스턴트:".cyan().bold(), entry.text),
    }
}

/// Print welcome banner
fn print_banner(
    model_id: &str,
    mirror_enabled: bool,
    speech_enabled: bool,
    log: &TranscriptLog,
    speaker: &Speaker,
) {
    println!();
    println!("{}", "╔═══════════════════════════════════════════╗".cyan().bold());
    println!(
        "{}{}{}",
        "║  ".cyan().bold(),
        "🪞 거울상 챗봇 (Mirror Chat)".white().bold(),
        "             ║".cyan().bold()
    );
    println!("{}", "╚═══════════════════════════════════════════╝".cyan().bold());
    println!();

    println!("{} {}", "Model:  ".yellow().bold(), model_id);
    println!("{} {}", "Mirror: ".yellow().bold(), on_off(mirror_enabled));
    println!(
        "{} {}{}",
        "Speech: ".yellow().bold(),
        on_off(speech_enabled),
        if speaker.is_available() { "" } else { " (엔진 없음)" }
    );
    match log.path() {
        Some(path) => println!("{} {}", "Log:    ".yellow().bold(), path.display()),
        None => println!("{} {}", "Log:    ".yellow().bold(), "disabled"),
    }

    println!();
    println!(
        "{} {}",
        "Commands:".green().bold(),
        "/help /history /mirror /speak /mono /stop /quit"
    );
}

/// Print conversation history
fn print_history(transcript: &[TranscriptEntry]) {
    if transcript.is_empty() {
        println!("\n{}", "아직 대화 기록이 없습니다.".yellow());
        return;
    }

    println!();
    println!("{}", "═══ 대화 기록 ═══".cyan().bold());

    for (i, entry) in transcript.iter().enumerate() {
        let speaker = match (entry.role, entry.machine_initiated) {
            (Role::User, _) => "사용자",
            (Role::Assistant, false) => "어시스턴트",
            (Role::Assistant, true) => "어시스턴트(혼잣말)",
        };
        println!(
            "{} {} {}",
            format!("[{}]", i + 1).blue().bold(),
            format!("{speaker}:").green().bold(),
            entry.text
        );
        println!("    ({})", entry.timestamp.format("%H:%M:%S"));
    }
}

/// Print help text
fn print_help() {
    println!();
    let commands = [
        ("/help, /h", "이 도움말을 표시"),
        ("/history", "대화 기록 표시"),
        ("/mirror", "거울상 모드(대조적 은유 변환) 켜기/끄기"),
        ("/speak", "응답 음성 낭독 켜기/끄기"),
        ("/mono", "혼잣말 모드 시작"),
        ("/stop", "혼잣말 모드 정지"),
        ("/quit, /exit, /q", "대화 종료"),
    ];

    for (cmd, desc) in commands {
        println!("  {} - {}", cmd.green().bold(), desc);
    }
}
