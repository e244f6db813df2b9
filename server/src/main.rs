use std::thread;
use std::time::{Duration, SystemTime};

use log::info;

use game::model::Knowledge;
use game::persistence::{SqliteLedger, SqlitePlotStore, Storage};
use game::Game;

fn main() {
    env_logger::init();
    info!("Start game server");
    let storage = Storage::open("./assets/database.sqlite").unwrap();
    storage.setup().unwrap();
    let known = Knowledge::load("./assets/knowledge.json").unwrap();
    let ledger = SqliteLedger::new(storage.clone());
    let store = SqlitePlotStore::new(storage);
    let mut game = Game::new(known, Box::new(ledger), Box::new(store));
    game.load_game_state(SystemTime::now()).unwrap();
    loop {
        let events = game.update(SystemTime::now());
        if !events.is_empty() {
            info!("Events: {:?}", events);
        }
        thread::sleep(Duration::from_millis(20));
    }
}
