// Integration tests for archscore

mod integration {
    mod cli_test;
    mod config_test;
    mod discovery_test;
    mod end_to_end_test;
}
