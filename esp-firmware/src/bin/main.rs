// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_board_support::config::{
    I2C_FREQUENCY_KHZ, I2C_MAX_RETRIES, I2C_POWER_CYCLE_HOLD_US, LED_COMPONENT_ID,
};
use esp_board_support::hal::{CycleDelay, EspTwoWire};
use esp_board_support::tasks::board_task;
use esp_board_support::{BoardTicks, BusConfig, FaultTolerantBus, RgbwLed, TickScheduler};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point (Composition-Root)
///
/// Initialisiert Hardware, baut LED und Bus, registriert die LED beim
/// System-Tick und spawnt den Board-Task. Danach schläft main().
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    // Die LED-Pulszeiten in config::CPU_CLOCK_MHZ gehen von diesem Takt aus!
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // RGBW-LED an GPIO8 (startet aus)
    let led_pin = Output::new(peripherals.GPIO8, Level::Low, OutputConfig::default());
    let led = RgbwLed::new(led_pin, CycleDelay::new());

    // I2C0 an GPIO6 (SDA) / GPIO7 (SCL)
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ));
    let i2c = I2c::new(peripherals.I2C0, i2c_config)
        .expect("Failed to initialize I2C0")
        .with_sda(peripherals.GPIO6)
        .with_scl(peripherals.GPIO7);

    let bus_config = BusConfig::default()
        .with_max_retries(I2C_MAX_RETRIES)
        .with_power_cycle_hold_us(I2C_POWER_CYCLE_HOLD_US);
    let bus = FaultTolerantBus::with_config(
        EspTwoWire::new(i2c, i2c_config),
        Delay::new(),
        bus_config,
    );
    defmt::info!("Bus bereit: {}", bus_config);

    // System-Tick: LED registrieren (Composition-Root besitzt die Registry)
    let mut ticks = BoardTicks::new();
    ticks
        .register(LED_COMPONENT_ID)
        .expect("Failed to register LED for system tick");

    // Spawn Board Task (LED + Bus + Tick-Verteilung)
    spawner.spawn(board_task(led, bus, ticks)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
