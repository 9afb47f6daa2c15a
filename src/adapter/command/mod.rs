mod freeze_handler;
mod unfreeze_handler;
