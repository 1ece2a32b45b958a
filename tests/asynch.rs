#![cfg(feature = "async")]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use sen15901::asynch::SEN15901;
use sen15901::common::{Config, WindDirection};
use sen15901::error::Error;

fn driver(config: Config) -> (SEN15901<MockHardware>, Rc<RefCell<Board>>) {
    let board = Rc::new(RefCell::new(Board::default()));
    let mut sensor = SEN15901::new(MockHardware(board.clone()), leak_shared(), config);
    sensor.init(request_process).unwrap();
    (sensor, board)
}

#[pollster::test]
async fn process_without_tick_is_noop() {
    let (mut sensor, board) = driver(config(1, 1));
    sensor.set_wind_measurement(true).unwrap();
    wind_edges(&hooks(&board), 5);
    sensor.process().await.unwrap();
    assert_eq!(sensor.wind_speed().latest_mh, 0);
    assert_eq!(board.borrow().ratio_reads, 0);
}

#[pollster::test]
async fn direction_awaits_vane() {
    let (mut sensor, board) = driver(config(1, 1));
    sensor.start_measurements().unwrap();
    for ratio in [NORTH, EAST] {
        wind_edges(&hooks(&board), 5);
        board.borrow_mut().ratios.push_back(Ok(ratio));
        hooks(&board).on_tick_second();
        sensor.process().await.unwrap();
    }
    assert_eq!(sensor.wind_speed().peak_mh, 12000);
    assert_eq!(sensor.wind_direction(), WindDirection::Available(45));
}

#[pollster::test]
async fn vane_failure_is_propagated() {
    let (mut sensor, board) = driver(config(1, 1));
    sensor.set_wind_measurement(true).unwrap();
    wind_edges(&hooks(&board), 5);
    board.borrow_mut().ratios.push_back(Err(MockError::AdcTimeout));
    hooks(&board).on_tick_second();
    assert_eq!(
        sensor.process().await,
        Err(Error::Hardware(MockError::AdcTimeout))
    );
    assert_eq!(sensor.wind_speed().latest_mh, 12000);
}
