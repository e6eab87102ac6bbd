mod mapper_tests;
