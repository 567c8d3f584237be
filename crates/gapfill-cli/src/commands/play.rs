//! The `gapfill play` command.
//!
//! A line-oriented session over stdin. The navigator decides which view is
//! shown; opening a section drops the previous session with all its answers.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use gapfill_catalog::DataService;
use gapfill_core::error::SessionError;
use gapfill_core::model::{QuestionId, SectionsIndex};
use gapfill_core::route::{path_from_hash, Navigator, Route, DEFAULT_PATH};
use gapfill_core::session::SectionSession;
use gapfill_report::text;

use crate::context::Context;

pub async fn execute(ctx: &Context, route: Option<String>) -> Result<()> {
    let service = ctx.service()?;
    let index = ctx.sections_list(&service).await?;

    let mut player = Player {
        ctx,
        service: &service,
        index: &index,
        navigator: Navigator::start(route.as_deref().unwrap_or("")),
        session: None,
    };

    println!("{}", ctx.course_title(&index));
    println!("{}", ctx.i18n.t("PlayHelp"));
    player.sync().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !player.handle(line.trim_end()).await {
            break;
        }
    }
    println!();

    Ok(())
}

struct Player<'a> {
    ctx: &'a Context,
    service: &'a DataService,
    index: &'a SectionsIndex,
    navigator: Navigator,
    session: Option<SectionSession>,
}

impl Player<'_> {
    /// Run one command. Returns `false` when the session should end.
    async fn handle(&mut self, line: &str) -> bool {
        let line = line.trim_start();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim_start()))
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "quit" | "exit" | "q" => return false,
            "help" => println!("{}", self.t("PlayHelp")),
            "list" => self.show_landing(),
            "show" => self.show_current(),
            "home" => self.go(DEFAULT_PATH).await,
            "open" => self.go(&Route::Section(rest.trim().to_string()).path()).await,
            "go" => self.go(&path_from_hash(rest)).await,
            "back" => {
                if self.navigator.back().is_some() {
                    self.sync().await;
                }
            }
            "forward" => {
                if self.navigator.forward().is_some() {
                    self.sync().await;
                }
            }
            "answer" => {
                let (qid, input) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                self.answer(qid, input);
            }
            "check" => self.check(rest.trim()),
            "check-all" => self.check_all(),
            "hint" => self.hint(rest.trim()),
            "reset" => self.reset(),
            other => println!(
                "{}",
                self.ctx.i18n.t_with("UnknownCommand", &[("command", &other)])
            ),
        }
        true
    }

    fn t(&self, key: &str) -> String {
        self.ctx.i18n.t(key)
    }

    async fn go(&mut self, path: &str) {
        self.navigator.navigate(path);
        self.sync().await;
    }

    /// Bring the view in line with the navigator's current route.
    async fn sync(&mut self) {
        match self.navigator.current() {
            Route::Landing => {
                self.session = None;
                self.show_landing();
            }
            Route::Section(id) => {
                if self.session.as_ref().is_some_and(|s| s.section().id == id) {
                    self.show_current();
                    return;
                }
                match self.service.load_section(self.index, &id).await {
                    Ok(section) => {
                        tracing::debug!(section = %id, "section opened");
                        self.session = Some(SectionSession::open(section));
                        self.show_current();
                    }
                    Err(e) => {
                        if e.is_not_found() {
                            println!("{}", self.ctx.i18n.t_with("UnknownSection", &[("id", &id)]));
                        } else {
                            println!(
                                "{}",
                                self.ctx.i18n.t_with("LoadSectionsError", &[("message", &e)])
                            );
                        }
                        self.navigator.replace(DEFAULT_PATH);
                        self.session = None;
                        self.show_landing();
                    }
                }
            }
        }
    }

    fn show_landing(&self) {
        println!("\n{}", self.t("SelectSection"));
        for entry in &self.index.sections {
            println!(
                "  {}  {}  ({})",
                entry.id,
                entry.title,
                Route::Section(entry.id.clone()).to_hash()
            );
        }
    }

    fn show_current(&self) {
        let Some(session) = &self.session else {
            self.show_landing();
            return;
        };
        println!("\n{}", session.section().title);
        for question in session.questions() {
            println!(
                "{}",
                text::render_question(&self.ctx.i18n, question, session.state(&question.id))
            );
        }
        println!("{}", text::render_progress(&self.ctx.i18n, &session.snapshot()));
    }

    /// The open session, or a hint to open one.
    fn session_mut(&mut self) -> Option<&mut SectionSession> {
        if self.session.is_none() {
            println!("{}", self.t("NoSectionOpen"));
        }
        self.session.as_mut()
    }

    fn report(&self, err: SessionError) {
        let SessionError::UnknownQuestion(id) = err;
        println!("{}", self.ctx.i18n.t_with("UnknownQuestion", &[("id", &id)]));
    }

    fn answer(&mut self, qid: &str, input: &str) {
        let Some(session) = self.session_mut() else {
            return;
        };
        match session.set_input(&QuestionId::new(qid), input) {
            Ok(snapshot) => println!("{}", text::render_progress(&self.ctx.i18n, &snapshot)),
            Err(e) => self.report(e),
        }
    }

    fn check(&mut self, qid: &str) {
        let Some(session) = self.session_mut() else {
            return;
        };
        match session.check_one(&QuestionId::new(qid)) {
            Ok(evaluation) => println!(
                "{}",
                text::render_check_result(&self.ctx.i18n, evaluation.was_correct)
            ),
            Err(e) => self.report(e),
        }
    }

    fn check_all(&mut self) {
        let Some(session) = self.session_mut() else {
            return;
        };
        let summary = session.check_all();
        let i18n = &self.ctx.i18n;
        print!("{}", text::render_summary(i18n, &summary));
        println!(
            "{}",
            text::render_correct_count(i18n, summary.correct_count, summary.total_count)
        );
    }

    fn hint(&self, qid: &str) {
        let Some(session) = &self.session else {
            println!("{}", self.t("NoSectionOpen"));
            return;
        };
        match session.hint(&QuestionId::new(qid)) {
            Ok("") => println!("{}", self.t("NoHint")),
            Ok(hint) => println!("{}: {hint}", self.t("Hint")),
            Err(e) => self.report(e),
        }
    }

    fn reset(&mut self) {
        let Some(session) = self.session_mut() else {
            return;
        };
        session.reset();
        let snapshot = session.snapshot();
        println!("{}", self.t("ResetDone"));
        println!("{}", text::render_progress(&self.ctx.i18n, &snapshot));
    }
}
