//! Basic usage example for memcursor
//!
//! Run with: cargo run --example basic_usage

use memcursor::*;

fn main() -> Result<(), Error> {
    println!("memcursor Basic Usage Example");
    println!("=============================");

    // Example 1: Owned cursor growing past its reservation
    println!("\n1. Growing Write Cursor:");
    let buf = {
        let mut writer = WriteCursor::with_capacity(4)?;
        println!("  Reserved {} bytes", writer.capacity());

        writer.write(b"ABCD")?;
        println!(
            "  Wrote 4 bytes: position={}, capacity={}",
            writer.position(),
            writer.capacity()
        );

        writer.write(b"EFGHIJ")?;
        println!(
            "  Wrote 6 more:  position={}, capacity={} (grown)",
            writer.position(),
            writer.capacity()
        );

        // The shared buffer keeps the bytes alive after the cursor is gone
        writer.into_shared_buffer()?
    };
    println!(
        "  Extracted {:?}: {:?}",
        buf,
        std::str::from_utf8(&buf).unwrap_or("?")
    );

    // Example 2: Short reads
    println!("\n2. Read Cursor with Short Reads:");
    {
        let mut reader = ReadCursor::new(b"HELLO");
        let mut dst = [0u8; 10];

        for request in [3, 10, 1] {
            let n = reader.read(&mut dst[..request]);
            println!(
                "  read({}) -> {} {:?}",
                request,
                n,
                std::str::from_utf8(&dst[..n]).unwrap_or("?")
            );
        }
        println!("  exhausted: {}", reader.is_exhausted());
    }

    // Example 3: Fixed external region
    println!("\n3. External Region:");
    {
        let mut region = [0u8; 8];
        let mut writer = WriteCursor::from_external(&mut region);
        writer.write(&0x0102_0304_u32.to_le_bytes())?;

        match writer.write(b"too long") {
            Ok(_) => println!("  unexpected success"),
            Err(e) => println!("  overflow rejected: {}", e),
        }

        let mut region = [0u8; 8];
        let mut writer = WriteCursor::from_external_with_policy(&mut region, OverflowPolicy::Spill);
        writer.write(&0x0102_0304_u32.to_le_bytes())?;
        writer.write(b"too long")?;
        println!(
            "  spilled to owned storage: external={}, position={}",
            writer.is_external(),
            writer.position()
        );
    }

    // Example 4: Integer round trip
    println!("\n4. Integer Round Trip:");
    {
        let value = 0xDEAD_BEEF_CAFE_F00D_u64;
        let mut writer = WriteCursor::new()?;
        writer.write(&value.to_le_bytes())?;

        let mut reader = ReadCursor::from(writer.as_borrowed_view());
        let mut bytes = [0u8; 8];
        reader.read_exact(&mut bytes)?;
        println!(
            "  wrote {:#x}, read back {:#x}",
            value,
            u64::from_le_bytes(bytes)
        );
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
