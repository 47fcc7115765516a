//! In-memory voice stack for exercising sessions without Discord.

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use songbird::input::{File, Input};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use super::{
    events::TrackEvents,
    transport::{TrackControl, VoiceConnection, VoiceTransport},
};
use crate::sources::MockMediaLookup;

/// Todo lo que se les pidió a los fakes, en orden
#[derive(Default)]
pub struct Recorder {
    sinks: Vec<TrackEvents>,
    calls: Vec<String>,
}

struct FakeTrack {
    token: u64,
    recorder: Arc<Mutex<Recorder>>,
}

impl FakeTrack {
    fn record(&self, call: &str) -> Result<()> {
        let entry = format!("{}#{}", call, self.token);
        self.recorder.lock().unwrap().calls.push(entry);
        Ok(())
    }
}

impl TrackControl for FakeTrack {
    fn pause(&self) -> Result<()> {
        self.record("pause")
    }

    fn resume(&self) -> Result<()> {
        self.record("resume")
    }

    fn stop(&self) -> Result<()> {
        self.record("stop")
    }

    fn set_volume(&self, level: f32) -> Result<()> {
        self.record(&format!("volume={}", level))
    }
}

pub struct FakeConnection {
    channel_id: ChannelId,
    destroyed: AtomicBool,
    recorder: Arc<Mutex<Recorder>>,
}

#[async_trait]
impl VoiceConnection for FakeConnection {
    fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    async fn destroy(&self) -> Result<()> {
        self.destroyed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn play(&self, _input: Input, events: TrackEvents) -> Result<Box<dyn TrackControl>> {
        let token = events.token();
        self.recorder.lock().unwrap().sinks.push(events);
        Ok(Box::new(FakeTrack {
            token,
            recorder: self.recorder.clone(),
        }))
    }
}

#[derive(Default)]
pub struct FakeTransport {
    recorder: Arc<Mutex<Recorder>>,
    pub connects: AtomicUsize,
    last: Mutex<Option<Arc<FakeConnection>>>,
}

impl FakeTransport {
    /// Llamadas de control como `"<llamada>#<token>"`
    pub fn calls(&self) -> Vec<String> {
        self.recorder.lock().unwrap().calls.clone()
    }

    /// Sink de eventos del último track iniciado
    pub fn last_sink(&self) -> TrackEvents {
        self.recorder.lock().unwrap().sinks.last().cloned().unwrap()
    }

    /// Cierra la última conexión sin avisar a la sesión
    pub fn drop_connection(&self) {
        let last = self.last.lock().unwrap();
        last.as_ref().unwrap().destroyed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl VoiceTransport for FakeTransport {
    async fn connect(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Arc<dyn VoiceConnection>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let connection = Arc::new(FakeConnection {
            channel_id,
            destroyed: AtomicBool::new(false),
            recorder: self.recorder.clone(),
        });
        *self.last.lock().unwrap() = Some(connection.clone());
        Ok(connection)
    }
}

/// Fuente de medios cuyos streams nunca se leen
pub fn streaming_media() -> MockMediaLookup {
    let mut media = MockMediaLookup::new();
    media
        .expect_open_stream()
        .returning(|_| Ok(File::new("/dev/null").into()));
    media
}
