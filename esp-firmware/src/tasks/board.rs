// Board Task - Verteilt den System-Tick und fragt den Sensor am Bus ab
use core::convert::Infallible;

use defmt::{error, info};
use embassy_time::{Duration, Ticker};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use esp_core::{
    BusController, BusError, FaultTolerantBus, Rgbw, RgbwLed, TickRegistry, TwoWireTransport,
};
use rgb::RGB8;

use crate::config::{
    LED_BRIGHTNESS, LED_COMPONENT_ID, SENSOR_ADDRESS, SENSOR_POLL_INTERVAL_SECS,
    SENSOR_WHO_AM_I_REGISTER, SYSTEM_TICK_MS,
};
use crate::{BoardBus, BoardLed, BoardTicks};

/// Board Logic - Testbare Logik ohne konkrete Hardware-Typen
///
/// - Ruft bei jedem System-Tick die registrierten Komponenten auf
/// - Liest einmal pro Intervall WHO_AM_I über den fehlertoleranten Bus
/// - Zeigt das Ergebnis blinkend an: Grün = Sensor ok, Rot = Bus-Fehler
///
/// # Parameter
/// - `led`: RGBW-LED (Hardware oder Mock)
/// - `bus`: Fehlertoleranter Bus
/// - `ticks`: Von der Composition-Root befüllte Tick-Registry
pub async fn board_logic<P, D, B, BD, const N: usize>(
    mut led: RgbwLed<P, D>,
    mut bus: FaultTolerantBus<B, BD>,
    ticks: TickRegistry<N>,
) where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
    B: TwoWireTransport + BusController,
    BD: DelayNs,
{
    let mut ticker = Ticker::every(Duration::from_millis(SYSTEM_TICK_MS));
    let ticks_per_poll = (SENSOR_POLL_INTERVAL_SECS * 1_000 / SYSTEM_TICK_MS).max(1);
    let mut tick_count: u64 = 0;

    loop {
        ticker.next().await;
        // Die LED ist die einzige Tick-Komponente dieses Boards
        ticks.dispatch(LED_COMPONENT_ID, &mut led);

        tick_count += 1;
        if tick_count % ticks_per_poll != 0 {
            continue;
        }

        let status: Rgbw = match poll_sensor(&mut bus) {
            Ok(who_am_i) => {
                info!("Sensor WHO_AM_I = {=u8:x}", who_am_i);
                RGB8 {
                    r: 0,
                    g: LED_BRIGHTNESS,
                    b: 0,
                }
                .into()
            }
            Err(e) => {
                error!("Sensor nicht erreichbar: {} (Code {})", e, e.code());
                RGB8 {
                    r: LED_BRIGHTNESS,
                    g: 0,
                    b: 0,
                }
                .into()
            }
        };

        // Blinken: gleiche Farbe an → aus, sonst neue Farbe senden
        if led.is_on() && led.color() == status {
            led.turn_off();
        } else if led.color() == status {
            led.turn_on();
        } else {
            led.set_rgbw(status);
        }
    }
}

/// Register-Adresse schreiben (Repeated Start), dann ein Byte lesen
fn poll_sensor<B, BD>(bus: &mut FaultTolerantBus<B, BD>) -> Result<u8, BusError>
where
    B: TwoWireTransport + BusController,
    BD: DelayNs,
{
    bus.write(SENSOR_ADDRESS, &[SENSOR_WHO_AM_I_REGISTER], true)?;
    let [who_am_i] = bus.read_array::<1>(SENSOR_ADDRESS, false)?;
    Ok(who_am_i)
}

/// Board Task - Embassy Task für parallele Ausführung
///
/// Embassy Tasks dürfen nicht generisch sein, daher die konkreten
/// Typ-Aliase aus lib.rs.
#[embassy_executor::task]
pub async fn board_task(led: BoardLed, bus: BoardBus, ticks: BoardTicks) {
    board_logic(led, bus, ticks).await;
}
