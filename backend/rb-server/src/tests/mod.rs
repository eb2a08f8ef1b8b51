mod api_error;
