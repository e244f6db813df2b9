use crate::api::{ActionError, Event};
use crate::model::PlayerId;
use crate::persistence::InventoryChange;
use crate::Game;

impl Game {
    /// Operator backdoor for seeding a player's stock while the collection
    /// subsystem lives outside this process.
    pub fn cheat_grant_item(
        &mut self,
        player: PlayerId,
        item: &str,
        quantity: u32,
    ) -> Result<Vec<Event>, ActionError> {
        self.known.items.find(item)?;
        self.ledger.credit(player, item, quantity)?;
        Ok(vec![vec![InventoryChange::ItemCredited {
            player,
            item: item.to_string(),
            quantity,
        }]
        .into()])
    }
}
