mod test_transform_basic;
