// Script execution workflow.
// - Enforces the saved-file precondition and save-before-run sequencing.
// - Evaluates the on-disk content on a worker thread, pumped back on tick.
// - Formats success/failure reports into the owning tab's console and
//   appends a transcript of each run to zenjs_runs.log.
use std::{
    fs,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::engine;

use super::{App, ErrorDialog};

pub(super) struct RunningScript {
    rx: Receiver<Result<String, String>>,
    path: PathBuf,
    tab_id: u64,
}

impl App {
    pub fn run_active_script(&mut self) {
        if self.running_script.is_some() {
            self.status_message = "A script is already running. Wait for it to finish.".to_string();
            return;
        }

        let Some(tab) = self.active_tab() else {
            self.status_message = "No open tabs.".to_string();
            return;
        };
        let tab_id = tab.id;

        let Some(path) = tab.path.clone() else {
            self.error_dialog = Some(ErrorDialog::warning(
                "No JavaScript file open in the current tab.".to_string(),
            ));
            return;
        };

        // Execution always reflects on-disk content. A failed save already
        // raised its dialog, so the run stops here.
        if !self.save_active_tab() {
            return;
        }

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                self.finish_script(tab_id, &path, Err(err.to_string()));
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(engine::evaluate(&source));
        });

        self.spinner_frame = 0;
        self.status_message = format!("Executing {}", path.display());
        self.running_script = Some(RunningScript { rx, path, tab_id });
    }

    pub(crate) fn script_running(&self) -> bool {
        self.running_script.is_some()
    }

    pub(super) fn pump_running_script(&mut self) {
        let outcome = {
            let Some(running) = self.running_script.as_ref() else {
                return;
            };
            match running.rx.try_recv() {
                Ok(outcome) => outcome,
                Err(mpsc::TryRecvError::Empty) => return,
                Err(mpsc::TryRecvError::Disconnected) => {
                    Err("script worker exited without a result".to_string())
                }
            }
        };

        let Some(running) = self.running_script.take() else {
            return;
        };
        self.finish_script(running.tab_id, &running.path, outcome);
    }

    /// Appends the formatted report to the owning tab's console. The tab is
    /// located by stable id; if it was closed meanwhile the report is
    /// dropped, not misdelivered.
    fn finish_script(&mut self, tab_id: u64, path: &Path, outcome: Result<String, String>) {
        let (text, outcome_label, detail) = match &outcome {
            Ok(result) => (
                format!("{}:\n{}\n", path.display(), result),
                "ok",
                result.clone(),
            ),
            Err(description) => (
                format!("Error executing {}:\n{}\n", path.display(), description),
                "error",
                description.clone(),
            ),
        };

        if let Some(tab) = self.tabs.iter_mut().find(|tab| tab.id == tab_id) {
            tab.console.append_text(&text);
        }

        match self.append_run_log(path, outcome_label, &detail) {
            Ok(log_path) => {
                self.status_message = format!(
                    "Finished {} (log: {})",
                    path.display(),
                    log_path.display()
                );
            }
            Err(log_err) => {
                self.status_message = format!(
                    "Finished {} (log write failed: {log_err})",
                    path.display()
                );
            }
        }
    }

    fn append_run_log(&self, path: &Path, outcome: &str, detail: &str) -> io::Result<PathBuf> {
        let log_path = self.initial_dir.join("zenjs_runs.log");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        writeln!(file, "=== run @ {timestamp} ===")?;
        writeln!(file, "file: {}", path.display())?;
        writeln!(file, "outcome: {outcome}")?;
        writeln!(file, "{detail}")?;
        writeln!(file, "=== end ===")?;
        writeln!(file)?;

        Ok(log_path)
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use tempfile::TempDir;

    use crate::app::App;

    fn app_in_temp_dir() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let app = App::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, app)
    }

    fn save_buffer_as(app: &mut App, name: &str, source: &str) {
        for ch in source.chars() {
            if ch == '\n' {
                app.insert_newline();
            } else {
                app.insert_char(ch);
            }
        }
        app.open_save_as_prompt();
        for ch in name.chars() {
            app.prompt_insert_char(ch);
        }
        assert!(app.commit_save_as_prompt());
    }

    fn wait_for_script(app: &mut App) {
        for _ in 0..3000 {
            app.tick();
            if !app.script_running() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("script did not finish in time");
    }

    #[test]
    fn successful_run_appends_the_result_template() {
        let (dir, mut app) = app_in_temp_dir();
        app.new_tab();
        save_buffer_as(&mut app, "calc.js", "1 + 2");

        app.run_active_script();
        wait_for_script(&mut app);

        let path = dir.path().join("calc.js");
        let expected = vec![format!("{}:", path.display()), "3".to_string(), String::new()];
        assert_eq!(app.tabs[1].console.lines(), expected.as_slice());
        // Nothing leaks into the other tab's console.
        assert!(app.tabs[0].console.lines().is_empty());
        // The run transcript landed next to the start directory.
        let log = std::fs::read_to_string(dir.path().join("zenjs_runs.log")).unwrap();
        assert!(log.contains("outcome: ok"));
    }

    #[test]
    fn throwing_run_appends_the_failure_template() {
        let (dir, mut app) = app_in_temp_dir();
        save_buffer_as(&mut app, "bad.js", "throw new Error('boom')");

        app.run_active_script();
        wait_for_script(&mut app);

        let path = dir.path().join("bad.js");
        let lines = app.tabs[0].console.lines();
        assert_eq!(lines[0], format!("Error executing {}:", path.display()));
        assert!(!lines[1].is_empty());
        assert!(lines[1].contains("boom"));
        assert_eq!(lines.last(), Some(&String::new()));
    }

    #[test]
    fn execute_without_a_path_warns_and_appends_nothing() {
        let (_dir, mut app) = app_in_temp_dir();

        app.run_active_script();

        assert!(!app.script_running());
        let dialog = app.error_dialog.as_ref().expect("warning dialog");
        assert_eq!(dialog.title, "Warning");
        assert_eq!(dialog.message, "No JavaScript file open in the current tab.");
        assert!(app.tabs.iter().all(|tab| tab.console.lines().is_empty()));
    }

    #[test]
    fn execute_saves_the_buffer_before_running() {
        let (dir, mut app) = app_in_temp_dir();
        save_buffer_as(&mut app, "grow.js", "40 + 1");
        for ch in " + 1".chars() {
            app.insert_char(ch);
        }
        assert!(app.tabs[0].modified);

        app.run_active_script();
        wait_for_script(&mut app);

        let path = dir.path().join("grow.js");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "40 + 1 + 1");
        assert!(!app.tabs[0].modified);
        assert_eq!(app.tabs[0].console.lines()[1], "42");
    }

    #[test]
    fn second_execute_while_running_is_refused() {
        let (_dir, mut app) = app_in_temp_dir();
        save_buffer_as(
            &mut app,
            "slow.js",
            "let n = 0; for (let i = 0; i < 2000000; i++) { n += i; } n",
        );

        app.run_active_script();
        assert!(app.script_running());
        app.run_active_script();
        assert_eq!(
            app.status_message,
            "A script is already running. Wait for it to finish."
        );
        wait_for_script(&mut app);
    }
}
