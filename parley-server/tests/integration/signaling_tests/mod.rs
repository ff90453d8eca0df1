mod test_offline_target_dropped;
