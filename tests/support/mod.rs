//! Recording fakes for the bus, the control lines and the delay.
//!
//! The mocks of `embedded-hal-mock` check each line on its own. These fakes
//! write into one shared log, so the order across lines can be asserted.
#![allow(dead_code)]

use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use epd_cog::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Cs,
    Dc,
    Rst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Set(Line, bool),
    BusySample(bool),
    Write(Vec<u8>),
    Flush,
    DelayNs(u64),
}

/// One command as the COG sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Command(u8, Vec<u8>),
    /// One or more samples of the busy line
    Wait,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

/// Error of a fake that was told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

impl spi::Error for Fault {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for Fault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

pub struct OutLine {
    line: Line,
    log: Log,
}

impl digital::ErrorType for OutLine {
    type Error = Infallible;
}

impl OutputPin for OutLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Set(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Set(self.line, true));
        Ok(())
    }
}

/// Busy line replaying scripted levels, ready (high) once the script ran out
pub struct BusyLine {
    log: Log,
    script: Rc<RefCell<VecDeque<bool>>>,
    fault: Rc<Cell<bool>>,
}

impl digital::ErrorType for BusyLine {
    type Error = Fault;
}

impl InputPin for BusyLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fault.get() {
            return Err(Fault);
        }
        let high = self.script.borrow_mut().pop_front().unwrap_or(true);
        self.log.borrow_mut().push(Event::BusySample(high));
        Ok(high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Bus recording every write, fails every write while `fault` is set
pub struct Bus {
    log: Log,
    fault: Rc<Cell<bool>>,
}

impl spi::ErrorType for Bus {
    type Error = Fault;
}

impl SpiBus for Bus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if self.fault.get() {
            return Err(Fault);
        }
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let written = words.to_vec();
        words.fill(0);
        self.write(&written)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

pub struct Delay {
    log: Log,
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.log
            .borrow_mut()
            .push(Event::DelayNs(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log
            .borrow_mut()
            .push(Event::DelayNs(u64::from(ms) * 1_000_000));
    }
}

pub type TestEpd = Epd<Bus, OutLine, BusyLine, OutLine, OutLine, Delay>;

pub struct Rig {
    pub epd: TestEpd,
    pub spi: Bus,
    pub delay: Delay,
    log: Log,
    busy_script: Rc<RefCell<VecDeque<bool>>>,
    bus_fault: Rc<Cell<bool>>,
    busy_fault: Rc<Cell<bool>>,
}

impl Rig {
    pub fn new(model: PanelModel) -> Self {
        Rig::with_config(model, Config::default())
    }

    pub fn with_config(model: PanelModel, config: Config) -> Self {
        let log: Log = Rc::default();
        let busy_script = Rc::new(RefCell::new(VecDeque::new()));
        let bus_fault = Rc::new(Cell::new(false));
        let busy_fault = Rc::new(Cell::new(false));
        let line = |line| OutLine {
            line,
            log: log.clone(),
        };
        let epd = Epd::new(
            model,
            line(Line::Cs),
            BusyLine {
                log: log.clone(),
                script: busy_script.clone(),
                fault: busy_fault.clone(),
            },
            line(Line::Dc),
            line(Line::Rst),
            config,
        );
        Rig {
            epd,
            spi: Bus {
                log: log.clone(),
                fault: bus_fault.clone(),
            },
            delay: Delay { log: log.clone() },
            log,
            busy_script,
            bus_fault,
            busy_fault,
        }
    }

    /// Queues busy levels (true = high = ready) for the next samples
    pub fn script_busy(&self, levels: &[bool]) {
        self.busy_script.borrow_mut().extend(levels.iter().copied());
    }

    /// Makes every following SPI write fail, or work again
    pub fn fail_bus(&self, fail: bool) {
        self.bus_fault.set(fail);
    }

    /// Makes every following read of the busy line fail, or work again
    pub fn fail_busy(&self, fail: bool) {
        self.busy_fault.set(fail);
    }

    pub fn initialize_global(&mut self) {
        self.epd
            .initialize_global(&mut self.spi, &mut self.delay)
            .unwrap();
    }

    pub fn initialize_fast(&mut self) {
        self.epd
            .initialize_fast(&mut self.spi, &mut self.delay)
            .unwrap();
    }

    pub fn update_global(&mut self, new: &[u8], old: &[u8]) {
        self.epd
            .update_global(&mut self.spi, &mut self.delay, new, old)
            .unwrap();
    }

    pub fn update_fast(&mut self, new: &[u8], old: &[u8]) {
        self.epd
            .update_fast(&mut self.spi, &mut self.delay, new, old)
            .unwrap();
    }

    pub fn power_off(&mut self) {
        self.epd.power_off(&mut self.spi, &mut self.delay).unwrap();
    }

    /// Takes everything recorded so far
    pub fn take_events(&self) -> Vec<Event> {
        self.log.borrow_mut().drain(..).collect()
    }

    /// Takes everything recorded so far as commands and busy waits
    pub fn take_steps(&self) -> Vec<Step> {
        steps(&self.take_events())
    }
}

/// Groups raw events into commands with their data, and busy waits.
///
/// Bytes written while DC is low start a new command, bytes written while
/// DC is high are data of the last command.
pub fn steps(events: &[Event]) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut dc_high = true;
    for event in events {
        match event {
            Event::Set(Line::Dc, level) => dc_high = *level,
            Event::BusySample(_) => {
                if steps.last() != Some(&Step::Wait) {
                    steps.push(Step::Wait);
                }
            }
            Event::Write(bytes) if !dc_high => {
                for byte in bytes {
                    steps.push(Step::Command(*byte, Vec::new()));
                }
            }
            Event::Write(bytes) => match steps.last_mut() {
                Some(Step::Command(_, data)) => data.extend_from_slice(bytes),
                other => panic!("data without command, last step {:?}", other),
            },
            _ => {}
        }
    }
    steps
}

/// Only the commands, busy waits dropped
pub fn commands(steps: &[Step]) -> Vec<(u8, Vec<u8>)> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Command(address, data) => Some((*address, data.clone())),
            Step::Wait => None,
        })
        .collect()
}

/// Data of every command with the given address
pub fn data_of(steps: &[Step], address: u8) -> Vec<Vec<u8>> {
    commands(steps)
        .into_iter()
        .filter(|(a, _)| *a == address)
        .map(|(_, data)| data)
        .collect()
}

pub fn blank_frame(model: PanelModel) -> Vec<u8> {
    vec![0u8; model.profile().buffer_len()]
}
