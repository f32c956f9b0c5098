/// One decoded CHIP-8 instruction. Operand names follow the usual notation:
/// `x`/`y` register indices, `n` nibble, `kk` byte, `nnn` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jump { nnn: u16 },
    /// 2nnn
    Call { nnn: u16 },
    /// 3xkk
    SkipEqImm { x: usize, kk: u8 },
    /// 4xkk
    SkipNeImm { x: usize, kk: u8 },
    /// 5xy0
    SkipEqReg { x: usize, y: usize },
    /// 6xkk
    LoadImm { x: usize, kk: u8 },
    /// 7xkk
    AddImm { x: usize, kk: u8 },
    /// 8xy0
    Move { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddCarry { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize },
    /// 8xy7
    SubReverse { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize },
    /// 9xy0
    SkipNeReg { x: usize, y: usize },
    /// Annn
    LoadI { nnn: u16 },
    /// Bnnn
    JumpV0 { nnn: u16 },
    /// Cxkk
    Random { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipKeyDown { x: usize },
    /// ExA1
    SkipKeyUp { x: usize },
    /// Fx07
    LoadDelay { x: usize },
    /// Fx0A
    WaitKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddI { x: usize },
    /// Fx29
    LoadGlyph { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegs { x: usize },
    /// Fx65
    LoadRegs { x: usize },
    /// anything else, including 0nnn machine-code calls; executes as a no-op
    Unknown(u16),
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        use Instruction::*;

        let x = ((opcode >> 8) & 0xf) as usize;
        let y = ((opcode >> 4) & 0xf) as usize;
        let n = (opcode & 0xf) as u8;
        let kk = (opcode & 0xff) as u8;
        let nnn = opcode & 0xfff;

        match opcode >> 12 {
            0x0 => match opcode {
                0x00e0 => Cls,
                0x00ee => Ret,
                _ => Unknown(opcode),
            },
            0x1 => Jump { nnn },
            0x2 => Call { nnn },
            0x3 => SkipEqImm { x, kk },
            0x4 => SkipNeImm { x, kk },
            0x5 if n == 0 => SkipEqReg { x, y },
            0x6 => LoadImm { x, kk },
            0x7 => AddImm { x, kk },
            0x8 => match n {
                0x0 => Move { x, y },
                0x1 => Or { x, y },
                0x2 => And { x, y },
                0x3 => Xor { x, y },
                0x4 => AddCarry { x, y },
                0x5 => Sub { x, y },
                0x6 => ShiftRight { x },
                0x7 => SubReverse { x, y },
                0xe => ShiftLeft { x },
                _ => Unknown(opcode),
            },
            0x9 if n == 0 => SkipNeReg { x, y },
            0xa => LoadI { nnn },
            0xb => JumpV0 { nnn },
            0xc => Random { x, kk },
            0xd => Draw { x, y, n },
            0xe => match kk {
                0x9e => SkipKeyDown { x },
                0xa1 => SkipKeyUp { x },
                _ => Unknown(opcode),
            },
            0xf => match kk {
                0x07 => LoadDelay { x },
                0x0a => WaitKey { x },
                0x15 => SetDelay { x },
                0x18 => SetSound { x },
                0x1e => AddI { x },
                0x29 => LoadGlyph { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegs { x },
                0x65 => LoadRegs { x },
                _ => Unknown(opcode),
            },
            _ => Unknown(opcode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Instruction::*;
    use super::*;

    #[test]
    fn test_decode_fields() {
        assert_eq!(Instruction::decode(0x00e0), Cls);
        assert_eq!(Instruction::decode(0x00ee), Ret);
        assert_eq!(Instruction::decode(0x1abc), Jump { nnn: 0xabc });
        assert_eq!(Instruction::decode(0x3a42), SkipEqImm { x: 0xa, kk: 0x42 });
        assert_eq!(Instruction::decode(0x8124), AddCarry { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8f0e), ShiftLeft { x: 0xf });
        assert_eq!(Instruction::decode(0xd125), Draw { x: 1, y: 2, n: 5 });
        assert_eq!(Instruction::decode(0xe3a1), SkipKeyUp { x: 3 });
        assert_eq!(Instruction::decode(0xf70a), WaitKey { x: 7 });
        assert_eq!(Instruction::decode(0xf265), LoadRegs { x: 2 });
    }

    #[test]
    fn test_decode_unknown() {
        for opcode in [0x0123, 0x0000, 0x5121, 0x9ab3, 0x8128, 0x800f, 0xe19f, 0xf1ff] {
            assert_eq!(Instruction::decode(opcode), Unknown(opcode), "{:04x}", opcode);
        }
    }
}
