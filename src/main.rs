use anyhow::Context;
use retro_vpad::config::PadConfig;
use retro_vpad::geometry::ScreenMetrics;
use retro_vpad::logger::{self, Verbosity};
use retro_vpad::pad::VirtualPad;
use retro_vpad::store::JsonFileStore;
use retro_vpad::touchscreen::{SlotTracker, TouchRange, open_touchscreen, slot_count};
use retro_vpad::uinput_bridge::UinputBridge;
use retro_vpad::vibration::LoggingHaptics;
use std::time::{Duration, Instant};
use tracing::info;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PadConfig::load_default().context("loading config")?;
    logger::init(Verbosity::from_u8(config.verbosity));
    let edit = std::env::args().any(|arg| arg == "--edit");

    info!("Starting Retro VPad...");

    let (path, device) =
        open_touchscreen(config.touchscreen.as_deref()).context("opening touchscreen")?;
    let range = TouchRange::from_device(&device, config.screen_width, config.screen_height)
        .with_context(|| format!("reading axes of {}", path.display()))?;
    let mut tracker = SlotTracker::new(range, slot_count(&device));

    let layout_path = config
        .layout_path()
        .context("no config directory for the layout file")?;
    let store = JsonFileStore::open(&layout_path)
        .with_context(|| format!("opening layout {}", layout_path.display()))?;
    let bridge = UinputBridge::create().context("creating virtual devices")?;

    let mut pad = VirtualPad::new(bridge, store, LoggingHaptics, config.clone())?;
    pad.layout(ScreenMetrics::new(
        range.screen_width,
        range.screen_height,
        config.density,
        config.is_tablet,
    ));
    pad.set_edit_mode(edit);

    info!(
        "Screen {}x{}, edit mode {}",
        range.screen_width, range.screen_height, edit
    );

    let mut events = device
        .into_event_stream()
        .context("streaming touchscreen events")?;
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            ev = events.next_event() => {
                let ev = ev.context("reading touchscreen")?;
                for touch in tracker.process(&ev) {
                    pad.handle_touch_event(&touch, range.screen_width, range.screen_height);
                }
            }
            _ = ticker.tick() => pad.tick(Instant::now()),
            _ = &mut shutdown => {
                info!("Shutting down Retro VPad...");
                break;
            }
        }
    }

    pad.detach();
    Ok(())
}
