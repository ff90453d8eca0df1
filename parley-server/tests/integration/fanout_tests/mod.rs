mod test_publish_delivery;
