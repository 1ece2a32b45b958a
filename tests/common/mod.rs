#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::num::NonZeroU8;
use std::rc::Rc;

use sen15901::common::{Config, Hooks, InterruptControl, Shared};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    AdcTimeout,
    GpioBusy,
}

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// What the driver asked of the board, visible to the test after the mock
/// has been moved into the driver.
#[derive(Default)]
pub struct Board {
    pub hooks: Option<Hooks>,
    pub initialised: bool,
    pub wind_interrupt: bool,
    pub rain_interrupt: bool,
    pub ratios: VecDeque<Result<i32, MockError>>,
    pub ratio_reads: usize,
    pub fail_interrupts: bool,
}

pub struct MockHardware(pub Rc<RefCell<Board>>);

impl InterruptControl for MockHardware {
    type Error = MockError;

    fn init(&mut self, hooks: Hooks) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        if board.fail_interrupts {
            return Err(MockError::GpioBusy);
        }
        board.hooks = Some(hooks);
        board.initialised = true;
        Ok(())
    }

    fn de_init(&mut self) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        board.initialised = false;
        board.wind_interrupt = false;
        board.rain_interrupt = false;
        Ok(())
    }

    fn set_wind_speed_interrupt(&mut self, enable: bool) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        if board.fail_interrupts {
            return Err(MockError::GpioBusy);
        }
        board.wind_interrupt = enable;
        Ok(())
    }

    fn set_rainfall_interrupt(&mut self, enable: bool) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        if board.fail_interrupts {
            return Err(MockError::GpioBusy);
        }
        board.rain_interrupt = enable;
        Ok(())
    }
}

impl MockHardware {
    fn next_ratio(&mut self) -> Result<i32, MockError> {
        let mut board = self.0.borrow_mut();
        board.ratio_reads += 1;
        board
            .ratios
            .pop_front()
            .expect("driver read the vane more often than the test expected")
    }
}

#[cfg(feature = "blocking")]
impl sen15901::blocking::Hardware for MockHardware {
    fn wind_direction_ratio(&mut self) -> Result<i32, MockError> {
        self.next_ratio()
    }
}

#[cfg(feature = "async")]
impl sen15901::asynch::Hardware for MockHardware {
    async fn wind_direction_ratio(&mut self) -> Result<i32, MockError> {
        self.next_ratio()
    }
}

/// Nominal divider ratios with the default 10 kΩ pull-up.
pub const NORTH: i32 = 767;
pub const EAST: i32 = 90;
pub const WEST: i32 = 923;

thread_local! {
    static PROCESS_REQUESTS: Cell<usize> = const { Cell::new(0) };
}

pub fn request_process() {
    PROCESS_REQUESTS.with(|count| count.set(count.get() + 1));
}

pub fn process_requests() -> usize {
    PROCESS_REQUESTS.with(|count| count.get())
}

pub fn leak_shared() -> &'static Shared {
    Box::leak(Box::new(Shared::new()))
}

pub fn config(speed_seconds: u8, direction_seconds: u8) -> Config {
    Config {
        wind_speed_sampling_seconds: NonZeroU8::new(speed_seconds).unwrap(),
        wind_direction_sampling_seconds: NonZeroU8::new(direction_seconds).unwrap(),
        ..Default::default()
    }
}

pub fn hooks(board: &Rc<RefCell<Board>>) -> Hooks {
    board.borrow().hooks.expect("driver was not initialised")
}

pub fn wind_edges(hooks: &Hooks, count: usize) {
    for _ in 0..count {
        hooks.on_wind_speed_edge();
    }
}

pub fn rain_edges(hooks: &Hooks, count: usize) {
    for _ in 0..count {
        hooks.on_rainfall_edge();
    }
}
