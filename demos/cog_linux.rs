#![deny(warnings)]

use embedded_hal::delay::DelayNs;
use epd_cog::prelude::*;
use linux_embedded_hal::{
    spidev::{self, SpidevOptions},
    sysfs_gpio::Direction,
    Delay, SpidevBus, SysfsPin,
};

// Pins of a Raspberry Pi with the panel on spidev0.0
// activate spi, gpio in raspi-config
// needs to be run with sudo because of sysfs_gpio permissions
// The panel model is picked with the first argument, e.g. `cog_linux 2`

fn output(number: u64) -> SysfsPin {
    let pin = SysfsPin::new(number);
    pin.export().expect("pin export");
    while !pin.is_exported() {}
    pin.set_direction(Direction::Out).expect("pin direction");
    pin.set_value(1).expect("pin value set to 1");
    pin
}

fn main() {
    let model = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u8>().expect("panel model id"))
        .map(|id| PanelModel::try_from(id).expect("known panel model"))
        .unwrap_or(PanelModel::Epd213);

    // Configure SPI, chip select is driven by the driver
    let mut spi = SpidevBus::open("/dev/spidev0.0").expect("spidev directory");
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(8_000_000)
        .mode(spidev::SpiModeFlags::SPI_MODE_0 | spidev::SpiModeFlags::SPI_NO_CS)
        .build();
    spi.configure(&options).expect("spi configuration");

    let cs = output(8); // BCM8, CE0
    let dc = output(25); // BCM25
    let rst = output(17); // BCM17

    let busy = SysfsPin::new(24); // BCM24
    busy.export().expect("busy export");
    while !busy.is_exported() {}
    busy.set_direction(Direction::In).expect("busy direction");

    let mut delay = Delay {};

    let mut epd = Epd::new(model, cs, busy, dc, rst, Config::default());
    println!(
        "{:?}: {}x{}, {} bytes per frame",
        model,
        epd.width(),
        epd.height(),
        epd.buffer_len()
    );

    let old = vec![0u8; epd.buffer_len()];
    let bytes_per_row = (usize::from(epd.width()) + 7) / 8;

    // horizontal stripes, 8 rows each
    let mut image = vec![Color::White.get_byte_value(); epd.buffer_len()];
    for (row, line) in image.chunks_mut(bytes_per_row).enumerate() {
        if (row / 8) % 2 == 0 {
            line.fill(Color::Black.get_byte_value());
        }
    }

    epd.initialize_global(&mut spi, &mut delay)
        .expect("global init");
    epd.update_global(&mut spi, &mut delay, &image, &old)
        .expect("global update");
    delay.delay_ms(2000);

    // invert the stripes a few times with the fast waveform
    epd.initialize_fast(&mut spi, &mut delay).expect("fast init");
    for _ in 0..4 {
        image.iter_mut().for_each(|byte| *byte = !*byte);
        epd.update_fast(&mut spi, &mut delay, &image, &old)
            .expect("fast update");
        delay.delay_ms(500);
    }

    epd.initialize_global(&mut spi, &mut delay)
        .expect("global init");
    epd.clear_frame(&mut spi, &mut delay, Color::White)
        .expect("clear frame");

    println!("Finished tests - going to sleep");
    epd.power_off(&mut spi, &mut delay).expect("power off");
}
