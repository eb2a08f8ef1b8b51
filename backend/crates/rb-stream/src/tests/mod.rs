mod broadcast_hub;
mod image_stream_registry;
mod response;
