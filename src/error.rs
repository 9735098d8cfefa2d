use std::net::SocketAddr;

/// Rejections for room requests. The `Display` text is what the client sees
/// in its `errorMsg` event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("Room not found!")]
    NotFound,

    #[error("Room is full!")]
    Full,

    #[error("You are already in a room or a match")]
    AlreadyInRoom,

    #[error("No room codes are available, try again later")]
    CodeSpaceExhausted,

    #[error("Private rooms are not enabled on this server")]
    RoomsDisabled,
}

/// Failures that stop the server from running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server failed: {0}")]
    Serve(#[from] std::io::Error),
}
