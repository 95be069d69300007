
mod test_replay;
mod test_undo;
