//! The actor task that owns the player.
//!
//! Every media notification, animation frame and user command is applied to
//! the player from this one task, so handlers never interleave.

use crate::command::Command;
use crate::media::SimulatedMedia;
use crate::presenter::ConsolePresenter;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use waveplay_core::{format_time, Player, PlayerOptions, Playlist, Track, WaveplayConfig};

pub struct Host {
    player: Player<SimulatedMedia, ConsolePresenter>,
    tick_interval: Duration,
    frame_interval: Duration,
}

impl Host {
    pub fn new(config: &WaveplayConfig, playlist: Playlist, media: SimulatedMedia) -> Self {
        let presenter =
            ConsolePresenter::new(config.waveform.layout(0.0), config.lyrics.line_height);
        let player = Player::new(PlayerOptions::from(config), playlist, media, presenter);

        Self {
            player,
            tick_interval: Duration::from_millis(config.host.tick_interval_ms),
            frame_interval: Duration::from_millis(config.host.frame_interval_ms),
        }
    }

    /// Paint the first view and label every playlist row with its length
    fn start(&mut self) {
        self.player.start();

        let lengths: Vec<(usize, Option<f64>)> = self
            .player
            .playlist()
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| (index, self.player.media().length_of(&track.source)))
            .collect();

        for (index, length) in lengths {
            match length {
                Some(length) => self.player.on_track_metadata(index, length),
                None => warn!("No length known for track #{}", index),
            }
        }
    }

    /// Run until cancelled or told to quit
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>, cancel_token: CancellationToken) {
        self.start();

        let mut ticks = tokio::time::interval(self.tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_tick = Instant::now();
        let mut commands_open = true;

        info!("Ready. Commands: play, next, prev, select N, click X, drag X..., search TERM, status, quit");

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    info!("Player shutting down gracefully");
                    break;
                }
                _ = ticks.tick() => {
                    let now = Instant::now();
                    self.advance_media(now.saturating_duration_since(last_tick));
                    last_tick = now;
                }
                _ = frames.tick() => {
                    self.deliver_frames(Instant::now());
                }
                command = commands.recv(), if commands_open => {
                    match command {
                        Some(Command::Quit) => {
                            cancel_token.cancel();
                        }
                        Some(command) => self.apply(command),
                        None => commands_open = false,
                    }
                }
            }
        }
    }

    /// Advance the media clock and forward its notifications
    fn advance_media(&mut self, elapsed: Duration) {
        let tick = self.player.media_mut().advance(elapsed);

        if tick.metadata_ready {
            self.player.on_metadata_ready();
        }
        if tick.time_advanced {
            self.player.on_time_advance();
        }
        if tick.ended {
            info!("Track ended");
            self.player.on_ended();
        }
    }

    fn deliver_frames(&mut self, now: Instant) {
        for ticket in self.player.presenter_mut().take_frames() {
            self.player.on_animation_frame(ticket, now);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePlay => self.player.toggle_play(),
            Command::Next => self.player.next(),
            Command::Previous => self.player.previous(),
            Command::Select(index) => self.player.select(index),
            Command::Click(x) => self.player.click(x),
            Command::Drag(positions) => {
                let Some((first, rest)) = positions.split_first() else {
                    return;
                };
                self.player.pointer_down(*first);
                for x in rest {
                    self.player.pointer_move(*x);
                }
                self.player.pointer_up();
            }
            Command::Search(term) => {
                let visible = self.player.search(&term);
                info!("{} of {} track(s) match {:?}", visible, self.player.playlist().len(), term);
            }
            Command::Status => self.log_status(),
            Command::Quit => {}
        }
    }

    fn log_status(&self) {
        let state = self.player.state();
        let title = self
            .player
            .playlist()
            .get(state.current_track_index)
            .map_or("", Track::display_title);

        info!(
            "#{} {} | {}",
            state.current_track_index,
            title,
            self.player.presenter().status_line()
        );
        if state.duration > 0.0 {
            info!(
                "{:.0}% played, {} left",
                state.progress() * 100.0,
                format_time(state.duration - state.current_time)
            );
        }
    }
}
