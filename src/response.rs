use tokio::io::{self, AsyncWrite, AsyncWriteExt};

/// The only response this server ever sends.
pub const FIXED_RESPONSE: &[u8] = b"HTTP/1.0 200 OK\r\n\
Content-Type: text/html\r\n\
Server: Bot\r\n\
\r\n\
<H1>Micro-webserver</H1>\r\n\
<br></br>\r\n\
<br></br>\r\n\
<H2>Oh ja!</H2>\r\n";

pub async fn write_fixed_response<W>(writer: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(FIXED_RESPONSE).await?;
    writer.flush().await
}
